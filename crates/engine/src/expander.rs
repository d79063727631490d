//! Event expansion.
//!
//! Flattens the three obligation sources of a budget file into one ordered
//! list of [`ForecastEvent`]s bounded to the `[today, today + horizon]`
//! window.

use chrono::{Days, NaiveDate};

use crate::{
    ForecastEvent, SourceType,
    contracts::{Contract, Frequency},
    expected_events::ExpectedEvent,
    invoices::Invoice,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything the store returned for one budget file.
///
/// Records are expected to be already filtered by owning file and by status
/// (active contracts, pending invoices and expected events).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Obligations {
    pub contracts: Vec<Contract>,
    pub invoices: Vec<Invoice>,
    pub expected_events: Vec<ExpectedEvent>,
}

/// Inclusive date range covered by a forecast.
#[derive(Clone, Copy, Debug)]
struct Window {
    start: NaiveDate,
    end: NaiveDate,
}

impl Window {
    fn new(today: NaiveDate, horizon_days: u32) -> Self {
        let end = today
            .checked_add_days(Days::new(u64::from(horizon_days)))
            .unwrap_or(NaiveDate::MAX);
        Self { start: today, end }
    }

    fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Expand `obligations` into dated events between `today` and
/// `today + horizon_days` (both inclusive), sorted by date.
///
/// Events of the same day keep their source order: contracts first, then
/// invoices, then expected events. Nothing is deduplicated across sources.
///
/// A record whose date cannot be parsed is skipped with a warning.
pub fn expand(obligations: &Obligations, today: NaiveDate, horizon_days: u32) -> Vec<ForecastEvent> {
    let window = Window::new(today, horizon_days);
    let mut events = Vec::new();

    for contract in &obligations.contracts {
        expand_contract(contract, window, &mut events);
    }
    events.extend(
        obligations
            .invoices
            .iter()
            .filter_map(|invoice| invoice_event(invoice, window)),
    );
    events.extend(
        obligations
            .expected_events
            .iter()
            .filter_map(|expected| expected_event(expected, window)),
    );

    events.sort_by_key(|event| event.date);
    events
}

fn parse_date(raw: &str, kind: &str, id: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::warn!("skipping {kind} {id}: malformed date {raw:?}: {err}");
            None
        }
    }
}

fn expand_contract(contract: &Contract, window: Window, events: &mut Vec<ForecastEvent>) {
    let (Some(raw_date), Some(raw_frequency)) = (&contract.next_payment_date, &contract.frequency)
    else {
        return;
    };
    let Some(anchor) = parse_date(raw_date, "contract", &contract.id) else {
        return;
    };
    let frequency = match Frequency::try_from(raw_frequency.as_str()) {
        Ok(frequency) => frequency,
        Err(err) => {
            tracing::debug!("contract {} does not recur: {err}", contract.id);
            return;
        }
    };

    let occurrences = (0..)
        .map_while(|n| frequency.occurrence(anchor, n))
        .take_while(|date| *date <= window.end)
        .filter(|date| *date >= window.start);

    events.extend(occurrences.map(|date| {
        ForecastEvent::new(
            date,
            contract.amount,
            contract.name.clone(),
            SourceType::Contract,
            contract.id.clone(),
        )
    }));
}

fn invoice_event(invoice: &Invoice, window: Window) -> Option<ForecastEvent> {
    let date = parse_date(&invoice.due_date, "invoice", &invoice.id)?;
    if !window.contains(date) {
        return None;
    }

    let description = invoice.linked_name.as_deref().unwrap_or("Invoice");
    Some(ForecastEvent::new(
        date,
        invoice.amount,
        description,
        SourceType::Invoice,
        invoice.id.clone(),
    ))
}

fn expected_event(expected: &ExpectedEvent, window: Window) -> Option<ForecastEvent> {
    let date = parse_date(&expected.expected_date, "expected event", &expected.id)?;
    if !window.contains(date) {
        return None;
    }

    Some(ForecastEvent::new(
        date,
        expected.expected_amount.unwrap_or(0),
        format!("Expected: {}", expected.source_type),
        SourceType::Schedule,
        expected.id.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn days(n: u64) -> NaiveDate {
        today().checked_add_days(Days::new(n)).unwrap()
    }

    fn contract(id: &str, amount: i64, next: Option<&str>, frequency: Option<&str>) -> Contract {
        Contract {
            id: id.to_string(),
            name: format!("Contract {id}"),
            amount,
            next_payment_date: next.map(ToString::to_string),
            frequency: frequency.map(ToString::to_string),
        }
    }

    fn invoice(id: &str, amount: i64, due: &str) -> Invoice {
        Invoice {
            id: id.to_string(),
            amount,
            due_date: due.to_string(),
            linked_name: Some(format!("Client {id}")),
        }
    }

    #[test]
    fn weekly_contract_fills_the_horizon() {
        let obligations = Obligations {
            contracts: vec![contract("gym", -2500, Some("2026-10-20"), Some("weekly"))],
            ..Default::default()
        };

        let events = expand(&obligations, today(), 30);

        let dates: Vec<_> = events.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![days(3), days(10), days(17), days(24)]);
        assert!(events.iter().all(|e| e.amount == -2500));
        assert!(events.iter().all(|e| e.is_from(SourceType::Contract, "gym")));
        assert_eq!(events[0].description, "Contract gym");
    }

    #[test]
    fn stale_contract_skips_past_occurrences() {
        let obligations = Obligations {
            contracts: vec![contract("rent", -90000, Some("2026-08-01"), Some("monthly"))],
            ..Default::default()
        };

        let events = expand(&obligations, today(), 60);

        let dates: Vec<_> = events.iter().map(|e| e.date.to_string()).collect();
        assert_eq!(dates, vec!["2026-11-01", "2026-12-01"]);
    }

    #[test]
    fn occurrence_on_horizon_end_is_included() {
        let obligations = Obligations {
            contracts: vec![contract("tax", -10000, Some("2026-11-16"), Some("yearly"))],
            ..Default::default()
        };

        assert_eq!(expand(&obligations, today(), 30).len(), 1);
        assert!(expand(&obligations, today(), 29).is_empty());
    }

    #[test]
    fn contract_without_date_or_known_frequency_emits_nothing() {
        let obligations = Obligations {
            contracts: vec![
                contract("a", -100, None, Some("monthly")),
                contract("b", -100, Some("2026-10-18"), None),
                contract("c", -100, Some("2026-10-18"), Some("fortnightly")),
            ],
            ..Default::default()
        };

        assert!(expand(&obligations, today(), 180).is_empty());
    }

    #[test]
    fn malformed_dates_only_skip_their_record() {
        let obligations = Obligations {
            contracts: vec![
                contract("broken", -100, Some("31/10/2026"), Some("monthly")),
                contract("ok", -200, Some("2026-10-31"), Some("quarterly")),
            ],
            invoices: vec![invoice("i-bad", 5000, "not a date"), invoice("i-ok", 7000, "2026-10-19")],
            expected_events: vec![ExpectedEvent {
                id: "e-bad".to_string(),
                expected_amount: Some(1),
                expected_date: "2026-13-01".to_string(),
                source_type: "refund".to_string(),
                source_id: None,
            }],
        };

        let events = expand(&obligations, today(), 30);

        let ids: Vec<_> = events.iter().map(|e| e.source_id.as_str()).collect();
        assert_eq!(ids, vec!["i-ok", "ok"]);
    }

    #[test]
    fn invoices_outside_the_window_are_dropped() {
        let obligations = Obligations {
            invoices: vec![
                invoice("past", 100, "2026-10-16"),
                invoice("today", 200, "2026-10-17"),
                invoice("last", 300, "2026-11-16"),
                invoice("beyond", 400, "2026-11-17"),
            ],
            ..Default::default()
        };

        let events = expand(&obligations, today(), 30);

        let ids: Vec<_> = events.iter().map(|e| e.source_id.as_str()).collect();
        assert_eq!(ids, vec!["today", "last"]);
        assert_eq!(events[0].source_type, SourceType::Invoice);
        assert_eq!(events[0].description, "Client today");
    }

    #[test]
    fn expected_events_default_amount_and_description() {
        let obligations = Obligations {
            expected_events: vec![ExpectedEvent {
                id: "e-1".to_string(),
                expected_amount: None,
                expected_date: "2026-10-25".to_string(),
                source_type: "tax_refund".to_string(),
                source_id: Some("irs".to_string()),
            }],
            ..Default::default()
        };

        let events = expand(&obligations, today(), 30);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].amount, 0);
        assert_eq!(events[0].description, "Expected: tax_refund");
        assert_eq!(events[0].source_type, SourceType::Schedule);
    }

    #[test]
    fn merged_sources_are_sorted_and_not_deduplicated() {
        let obligations = Obligations {
            contracts: vec![contract("power", -8000, Some("2026-10-20"), Some("monthly"))],
            invoices: vec![
                invoice("power-bill", -8000, "2026-10-20"),
                invoice("early", 1000, "2026-10-18"),
            ],
            expected_events: vec![],
        };

        let events = expand(&obligations, today(), 10);

        let ids: Vec<_> = events.iter().map(|e| e.source_id.as_str()).collect();
        assert_eq!(ids, vec!["early", "power", "power-bill"]);
    }
}
