//! Actions the host dispatches into the picker state machine.
//!
//! On the wire an action is `{"type": "SELECT_DATE", "payload": "2024-01-05"}`.
//! Unit actions carry no payload. Types this version does not know are read
//! as [`CalendarAction::Unknown`] whatever their payload.

use chrono::NaiveDate;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::date_range::DateRange;
use crate::locale::LocaleSettings;
use crate::state::SelectionPhase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalendarAction {
    SetDateRange(DateRange),
    SetStartTime(String),
    SetEndTime(String),
    SetCurrentMonth(NaiveDate),
    SetSelectionPhase(SelectionPhase),
    ToggleTimePicker,
    ToggleMonthPicker,
    ToggleYearPicker,
    CloseAllPickers,
    SetLocaleSettings(LocaleSettings),
    SelectDate(NaiveDate),
    PrevMonth,
    NextMonth,
    /// 0-based month index within the visible year
    SetMonth(i32),
    SetYear(i32),
    /// Any action type this version does not know. Applying it changes nothing.
    Unknown,
}

#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Option<Value>,
}

impl<'de> Deserialize<'de> for CalendarAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let RawAction { kind, payload } = RawAction::deserialize(deserializer)?;

        let action = match kind.as_str() {
            "SET_DATE_RANGE" => CalendarAction::SetDateRange(parse_payload(&kind, payload)?),
            "SET_START_TIME" => CalendarAction::SetStartTime(parse_payload(&kind, payload)?),
            "SET_END_TIME" => CalendarAction::SetEndTime(parse_payload(&kind, payload)?),
            "SET_CURRENT_MONTH" => CalendarAction::SetCurrentMonth(parse_payload(&kind, payload)?),
            "SET_SELECTION_PHASE" => {
                CalendarAction::SetSelectionPhase(parse_payload(&kind, payload)?)
            }
            "TOGGLE_TIME_PICKER" => CalendarAction::ToggleTimePicker,
            "TOGGLE_MONTH_PICKER" => CalendarAction::ToggleMonthPicker,
            "TOGGLE_YEAR_PICKER" => CalendarAction::ToggleYearPicker,
            "CLOSE_ALL_PICKERS" => CalendarAction::CloseAllPickers,
            "SET_LOCALE_SETTINGS" => {
                CalendarAction::SetLocaleSettings(parse_payload(&kind, payload)?)
            }
            "SELECT_DATE" => CalendarAction::SelectDate(parse_payload(&kind, payload)?),
            "PREV_MONTH" => CalendarAction::PrevMonth,
            "NEXT_MONTH" => CalendarAction::NextMonth,
            "SET_MONTH" => CalendarAction::SetMonth(parse_payload(&kind, payload)?),
            "SET_YEAR" => CalendarAction::SetYear(parse_payload(&kind, payload)?),
            _ => CalendarAction::Unknown,
        };

        Ok(action)
    }
}

fn parse_payload<T, E>(kind: &str, payload: Option<Value>) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    let payload = payload.ok_or_else(|| E::custom(format!("{} requires a payload", kind)))?;
    serde_json::from_value(payload).map_err(|e| E::custom(format!("{}: {}", kind, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_date_wire_format() {
        let action = CalendarAction::SelectDate(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"type":"SELECT_DATE","payload":"2024-01-05"}"#);
    }

    #[test]
    fn unit_actions_have_no_payload() {
        let json = serde_json::to_string(&CalendarAction::CloseAllPickers).unwrap();
        assert_eq!(json, r#"{"type":"CLOSE_ALL_PICKERS"}"#);
    }

    #[test]
    fn parses_locale_settings_payload() {
        let json = r#"{"type":"SET_LOCALE_SETTINGS","payload":{"firstDayOfWeek":1,"weekdays":["Mon","Tue","Wed","Thu","Fri","Sat","Sun"]}}"#;
        let action: CalendarAction = serde_json::from_str(json).unwrap();
        match action {
            CalendarAction::SetLocaleSettings(settings) => {
                assert_eq!(settings.first_day_of_week, 1);
                assert_eq!(settings.weekdays.len(), 7);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn parses_month_and_year() {
        let action: CalendarAction = serde_json::from_str(r#"{"type":"SET_MONTH","payload":2}"#).unwrap();
        assert_eq!(action, CalendarAction::SetMonth(2));
        let action: CalendarAction = serde_json::from_str(r#"{"type":"SET_YEAR","payload":2025}"#).unwrap();
        assert_eq!(action, CalendarAction::SetYear(2025));
    }

    #[test]
    fn unknown_type_parses_as_unknown() {
        let action: CalendarAction = serde_json::from_str(r#"{"type":"UNKNOWN_ACTION"}"#).unwrap();
        assert_eq!(action, CalendarAction::Unknown);
    }

    #[test]
    fn unknown_type_with_payload_is_ignored() {
        let actions: Vec<CalendarAction> = serde_json::from_str(
            r#"[{"type":"SET_THEME","payload":"dark"},{"type":"RESIZE","payload":{"w":3}},{"type":"NEXT_MONTH"}]"#,
        )
        .unwrap();
        assert_eq!(
            actions,
            [CalendarAction::Unknown, CalendarAction::Unknown, CalendarAction::NextMonth]
        );
    }

    #[test]
    fn known_type_needs_its_payload() {
        let missing = serde_json::from_str::<CalendarAction>(r#"{"type":"SELECT_DATE"}"#);
        assert!(missing.unwrap_err().to_string().contains("SELECT_DATE requires a payload"));

        let malformed =
            serde_json::from_str::<CalendarAction>(r#"{"type":"SET_MONTH","payload":"May"}"#);
        assert!(malformed.is_err());
    }

    #[test]
    fn parses_range_and_phase_payloads() {
        let action: CalendarAction = serde_json::from_str(
            r#"{"type":"SET_DATE_RANGE","payload":{"startDate":"2024-01-01","endDate":"2024-01-05"}}"#,
        )
        .unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(action, CalendarAction::SetDateRange(DateRange::new(start, end)));

        let action: CalendarAction =
            serde_json::from_str(r#"{"type":"SET_SELECTION_PHASE","payload":"end"}"#).unwrap();
        assert_eq!(action, CalendarAction::SetSelectionPhase(SelectionPhase::End));
    }

    #[test]
    fn unit_action_ignores_stray_payload() {
        let action: CalendarAction =
            serde_json::from_str(r#"{"type":"PREV_MONTH","payload":null}"#).unwrap();
        assert_eq!(action, CalendarAction::PrevMonth);
    }
}
