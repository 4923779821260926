//! Weekly time-block tables keyed by chronotype.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chronotype {
    Morning,
    #[default]
    Intermediate,
    Evening,
}

impl Chronotype {
    pub const ALL: [Chronotype; 3] = [
        Chronotype::Morning,
        Chronotype::Intermediate,
        Chronotype::Evening,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Chronotype::Morning => "Morning",
            Chronotype::Intermediate => "Intermediate",
            Chronotype::Evening => "Evening",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    DeepWork,
    Review,
    Practice,
    Consolidation,
    Application,
    Flexible,
    Assessment,
    Rest,
}

impl Activity {
    pub fn label(&self) -> &'static str {
        match self {
            Activity::DeepWork => "Deep work",
            Activity::Review => "Review",
            Activity::Practice => "Practice",
            Activity::Consolidation => "Consolidation",
            Activity::Application => "Application",
            Activity::Flexible => "Flexible",
            Activity::Assessment => "Assessment",
            Activity::Rest => "Rest",
        }
    }
}

/// Activity -> time window for one day.
pub type DayBlocks = BTreeMap<Activity, String>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub monday: DayBlocks,
    pub tuesday: DayBlocks,
    pub wednesday: DayBlocks,
    pub thursday: DayBlocks,
    pub friday: DayBlocks,
    pub saturday: DayBlocks,
    pub sunday: DayBlocks,
}

impl WeeklySchedule {
    pub fn days(&self) -> [(&'static str, &DayBlocks); 7] {
        [
            ("Monday", &self.monday),
            ("Tuesday", &self.tuesday),
            ("Wednesday", &self.wednesday),
            ("Thursday", &self.thursday),
            ("Friday", &self.friday),
            ("Saturday", &self.saturday),
            ("Sunday", &self.sunday),
        ]
    }
}

const REST_DAY: &str = "Rest or light review";

/// Clock times used to build a week. `morning` and `afternoon` hold the slot
/// start followed by the end after 2h, 1h and 1h30 (morning) or 1h, 1h30
/// and 30min (afternoon). `saturday` is the flexible morning block.
struct TimeTable {
    morning: [&'static str; 4],
    afternoon: [&'static str; 4],
    saturday: [&'static str; 2],
}

fn time_table(chronotype: Chronotype) -> TimeTable {
    match chronotype {
        Chronotype::Morning => TimeTable {
            morning: ["08:30", "10:30", "09:30", "10:00"],
            afternoon: ["14:00", "15:00", "15:30", "14:30"],
            saturday: ["09:00", "11:00"],
        },
        Chronotype::Intermediate => TimeTable {
            morning: ["10:30", "12:30", "11:30", "12:00"],
            afternoon: ["15:30", "16:30", "17:00", "16:00"],
            saturday: ["11:00", "13:00"],
        },
        Chronotype::Evening => TimeTable {
            morning: ["11:30", "13:30", "12:30", "13:00"],
            afternoon: ["17:30", "18:30", "19:00", "18:00"],
            saturday: ["12:00", "14:00"],
        },
    }
}

fn day(entries: [(Activity, String); 2]) -> DayBlocks {
    entries.into_iter().collect()
}

/// Returns the fixed week layout for a chronotype.
pub fn weekly_schedule(chronotype: Chronotype) -> WeeklySchedule {
    let TimeTable {
        morning: m,
        afternoon: a,
        saturday: s,
    } = time_table(chronotype);
    let w = |start: &str, end: &str| format!("{}-{}", start, end);

    WeeklySchedule {
        monday: day([
            (Activity::DeepWork, w(m[0], m[1])),
            (Activity::Review, w(a[0], a[1])),
        ]),
        tuesday: day([
            (Activity::DeepWork, w(m[0], m[1])),
            (Activity::Practice, w(a[0], a[2])),
        ]),
        wednesday: day([
            (Activity::Review, w(m[0], m[2])),
            (Activity::Consolidation, w(a[0], a[1])),
        ]),
        thursday: day([
            (Activity::DeepWork, w(m[0], m[1])),
            (Activity::Application, w(a[0], a[2])),
        ]),
        friday: day([
            (Activity::Practice, w(m[0], m[3])),
            (Activity::Review, w(a[0], a[1])),
        ]),
        saturday: day([
            (Activity::Flexible, w(s[0], s[1])),
            (Activity::Assessment, w(a[0], a[3])),
        ]),
        sunday: [(Activity::Rest, REST_DAY.to_string())].into_iter().collect(),
    }
}

/// Peak study windows for a chronotype.
pub fn optimal_study_times(chronotype: Chronotype) -> Vec<String> {
    let times: [&str; 2] = match chronotype {
        Chronotype::Morning => ["08:00-10:00", "14:00-16:00"],
        Chronotype::Intermediate => ["10:00-12:00", "15:00-17:00"],
        Chronotype::Evening => ["11:00-13:00", "17:00-19:00"],
    };
    times.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_morning_table() {
        let week = weekly_schedule(Chronotype::Morning);
        assert_eq!(week.monday[&Activity::DeepWork], "08:30-10:30");
        assert_eq!(week.monday[&Activity::Review], "14:00-15:00");
        assert_eq!(week.tuesday[&Activity::Practice], "14:00-15:30");
        assert_eq!(week.friday[&Activity::Practice], "08:30-10:00");
        assert_eq!(week.saturday[&Activity::Flexible], "09:00-11:00");
        assert_eq!(week.saturday[&Activity::Assessment], "14:00-14:30");
    }

    #[test]
    fn test_evening_table() {
        let week = weekly_schedule(Chronotype::Evening);
        assert_eq!(week.wednesday[&Activity::Review], "11:30-12:30");
        assert_eq!(week.thursday[&Activity::Application], "17:30-19:00");
        assert_eq!(week.saturday[&Activity::Assessment], "17:30-18:00");
    }

    #[test]
    fn test_every_day_is_filled() {
        for chronotype in Chronotype::ALL {
            let week = weekly_schedule(chronotype);
            for (day, blocks) in week.days() {
                assert!(!blocks.is_empty(), "{} empty for {:?}", day, chronotype);
            }
            assert_eq!(week.sunday.len(), 1);
            assert!(week.sunday.contains_key(&Activity::Rest));
        }
    }

    #[test]
    fn test_default_chronotype_is_intermediate() {
        assert_eq!(Chronotype::default(), Chronotype::Intermediate);
        let json = serde_json::to_value(weekly_schedule(Chronotype::default())).unwrap();
        assert_eq!(json["monday"]["deep_work"], "10:30-12:30");
    }

    #[test]
    fn test_optimal_times() {
        assert_eq!(optimal_study_times(Chronotype::Evening), vec!["11:00-13:00", "17:00-19:00"]);
    }
}
