use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::ScheduleError;
use crate::models::{TimeSlot, Weekday};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayRule {
    pub weekday: Weekday,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

impl WeekdayRule {
    pub fn slot(&self, slot_id: &str) -> Option<&TimeSlot> {
        self.slots
            .iter()
            .find(|s| s.id.as_deref() == Some(slot_id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRuleSet {
    #[serde(default)]
    pub weekday_rules: Vec<WeekdayRule>,
}

impl AvailabilityRuleSet {
    pub fn from_json(s: &str) -> Result<Self, ScheduleError> {
        let mut set: AvailabilityRuleSet = serde_json::from_str(s)
            .map_err(|e| ScheduleError::InvalidPayload(e.to_string()))?;
        set.normalize()?;
        Ok(set)
    }

    pub(crate) fn normalize(&mut self) -> Result<(), ScheduleError> {
        let mut seen = HashSet::new();
        for rule in &self.weekday_rules {
            if !seen.insert(rule.weekday) {
                return Err(ScheduleError::DuplicateWeekday(rule.weekday));
            }
        }
        self.weekday_rules.sort_by_key(|r| r.weekday);
        for rule in &mut self.weekday_rules {
            rule.slots.sort_by_key(|s| s.start);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.weekday_rules.is_empty()
    }

    pub fn weekdays(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.weekday_rules.iter().map(|r| r.weekday)
    }

    pub fn rule(&self, weekday: Weekday) -> Option<&WeekdayRule> {
        self.weekday_rules.iter().find(|r| r.weekday == weekday)
    }

    pub fn open_slots(&self, weekday: Weekday) -> Vec<&TimeSlot> {
        self.rule(weekday)
            .map(|r| r.slots.iter().filter(|s| !s.is_booked()).collect())
            .unwrap_or_default()
    }

    pub fn to_human_readable(&self) -> String {
        let mut rules: Vec<&WeekdayRule> = self
            .weekday_rules
            .iter()
            .filter(|r| !r.slots.is_empty())
            .collect();
        rules.sort_by_key(|r| r.weekday);

        rules
            .iter()
            .map(|r| {
                let slots = r
                    .slots
                    .iter()
                    .map(|s| format!("{}-{}", s.start, s.end))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: {slots}", r.weekday)
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}
