//! Day by day balance simulation.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ForecastEvent;

/// Number of days after today (inclusive) considered by
/// [`ForecastResult::safe_to_spend`].
pub const SAFE_TO_SPEND_DAYS: u32 = 30;

/// Balance at the end of one simulated day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBalance {
    pub date: NaiveDate,
    pub balance: i64,
    pub events: Vec<ForecastEvent>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: i64,
}

/// Net cash flow of a calendar month, keyed `YYYY-MM`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyNet {
    pub month: String,
    pub net: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    /// One entry per day, index 0 is today.
    pub daily_curve: Vec<DailyBalance>,
    /// Lowest balance of the whole curve; the earliest day wins ties.
    pub worst_point: BalancePoint,
    /// Lowest balance over the next [`SAFE_TO_SPEND_DAYS`] days, never
    /// negative.
    pub safe_to_spend: i64,
    pub monthly_net_cashflow: Vec<MonthlyNet>,
}

pub(crate) fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Sum of `amounts`, clamped to the `i64` range instead of overflowing.
pub(crate) fn saturating_total(amounts: impl IntoIterator<Item = i64>) -> i64 {
    amounts.into_iter().fold(0i64, i64::saturating_add)
}

/// Walk `horizon_days + 1` days starting at `today`, applying every event
/// on the day it lands.
///
/// Events dated outside the simulated window never land on a day and are
/// ignored. Balances and monthly nets saturate at the `i64` bounds.
pub fn simulate(
    starting_balance: i64,
    events: &[ForecastEvent],
    horizon_days: u32,
    today: NaiveDate,
) -> ForecastResult {
    let mut by_day: HashMap<NaiveDate, Vec<ForecastEvent>> = HashMap::new();
    for event in events {
        by_day.entry(event.date).or_default().push(event.clone());
    }

    let mut balance = starting_balance;
    let mut daily_curve = Vec::with_capacity(horizon_days as usize + 1);
    let mut worst_point = BalancePoint {
        date: today,
        balance: starting_balance,
    };
    let mut min_near_term = starting_balance;
    let mut monthly: BTreeMap<String, i64> = BTreeMap::new();

    for (offset, date) in (0..=horizon_days).zip(today.iter_days()) {
        let day_events = by_day.remove(&date).unwrap_or_default();
        let day_net = saturating_total(day_events.iter().map(|event| event.amount));
        balance = balance.saturating_add(day_net);

        if offset == 0 || balance < worst_point.balance {
            worst_point = BalancePoint { date, balance };
        }
        if offset <= SAFE_TO_SPEND_DAYS {
            min_near_term = if offset == 0 {
                balance
            } else {
                min_near_term.min(balance)
            };
        }
        let month_net = monthly.entry(month_key(date)).or_default();
        *month_net = month_net.saturating_add(day_net);

        daily_curve.push(DailyBalance {
            date,
            balance,
            events: day_events,
        });
    }

    ForecastResult {
        daily_curve,
        worst_point,
        safe_to_spend: min_near_term.max(0),
        monthly_net_cashflow: monthly
            .into_iter()
            .map(|(month, net)| MonthlyNet { month, net })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::*;
    use crate::SourceType;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn event(offset: u64, amount: i64) -> ForecastEvent {
        ForecastEvent::new(
            today().checked_add_days(Days::new(offset)).unwrap(),
            amount,
            format!("day {offset}"),
            SourceType::Schedule,
            format!("s-{offset}"),
        )
    }

    #[test]
    fn empty_events_produce_a_flat_curve() {
        for balance in [0, 12345, -500] {
            let result = simulate(balance, &[], 90, today());

            assert_eq!(result.daily_curve.len(), 91);
            assert!(result.daily_curve.iter().all(|day| day.balance == balance));
            assert!(result.daily_curve.iter().all(|day| day.events.is_empty()));
            assert_eq!(
                result.worst_point,
                BalancePoint {
                    date: today(),
                    balance
                }
            );
            assert_eq!(result.safe_to_spend, balance.max(0));
        }
    }

    #[test]
    fn curve_length_follows_horizon() {
        for horizon in [0, 1, 30, 31, 365, 730] {
            let result = simulate(0, &[event(0, 10)], horizon, today());
            assert_eq!(result.daily_curve.len(), horizon as usize + 1);
        }
    }

    #[test]
    fn zero_horizon_is_a_single_day() {
        let result = simulate(1000, &[event(0, -300), event(1, -5000)], 0, today());

        assert_eq!(result.daily_curve.len(), 1);
        assert_eq!(result.daily_curve[0].balance, 700);
        assert_eq!(result.worst_point.balance, 700);
        assert_eq!(result.safe_to_spend, 700);
        assert_eq!(
            result.monthly_net_cashflow,
            vec![MonthlyNet {
                month: "2026-10".to_string(),
                net: -300
            }]
        );
    }

    #[test]
    fn dip_then_income() {
        let events = [event(5, -50000), event(10, 200000)];

        let result = simulate(100000, &events, 30, today());

        let curve = &result.daily_curve;
        assert!(curve[0..5].iter().all(|day| day.balance == 100000));
        assert_eq!(curve[5].balance, 50000);
        assert_eq!(curve[10].balance, 250000);
        assert_eq!(curve[30].balance, 250000);
        assert_eq!(result.worst_point.balance, 50000);
        assert_eq!(result.worst_point.date, curve[5].date);
        assert_eq!(curve[5].events, vec![event(5, -50000)]);
        assert_eq!(result.safe_to_spend, 50000);
    }

    #[test]
    fn safe_to_spend_is_floored_at_zero() {
        let result = simulate(100000, &[event(1, -200000)], 30, today());

        assert_eq!(result.safe_to_spend, 0);
        assert_eq!(result.worst_point.balance, -100000);
    }

    #[test]
    fn safe_to_spend_ignores_days_after_thirty() {
        let events = [event(30, -1000), event(31, -50000)];

        let result = simulate(10000, &events, 60, today());

        assert_eq!(result.safe_to_spend, 9000);
        assert_eq!(result.worst_point.balance, -41000);
        assert_eq!(result.worst_point.date, result.daily_curve[31].date);
    }

    #[test]
    fn worst_point_keeps_first_of_equal_minimums() {
        let events = [event(3, -100), event(4, 100), event(8, -100)];

        let result = simulate(0, &events, 10, today());

        assert_eq!(result.worst_point.balance, -100);
        assert_eq!(result.worst_point.date, result.daily_curve[3].date);
    }

    #[test]
    fn worst_point_is_a_lower_bound_and_flows_are_conserved() {
        let events = [
            event(0, 2500),
            event(2, -7000),
            event(2, 1500),
            event(20, -40000),
            event(45, 90000),
            event(89, -12000),
        ];

        let result = simulate(20000, &events, 120, today());

        assert!(
            result
                .daily_curve
                .iter()
                .all(|day| result.worst_point.balance <= day.balance)
        );
        let monthly_total: i64 = result.monthly_net_cashflow.iter().map(|m| m.net).sum();
        let event_total: i64 = events.iter().map(|e| e.amount).sum();
        assert_eq!(monthly_total, event_total);
        let near_term_min = result.daily_curve[..=30]
            .iter()
            .map(|day| day.balance)
            .min()
            .unwrap();
        assert_eq!(result.safe_to_spend, near_term_min.max(0));
    }

    #[test]
    fn monthly_net_covers_every_touched_month() {
        let events = [event(0, 100), event(20, -40), event(50, 7)];

        let result = simulate(0, &events, 80, today());

        let months: Vec<_> = result
            .monthly_net_cashflow
            .iter()
            .map(|m| (m.month.as_str(), m.net))
            .collect();
        assert_eq!(
            months,
            vec![("2026-10", 100), ("2026-11", -40), ("2026-12", 7), ("2027-01", 0)]
        );
    }

    #[test]
    fn extreme_amounts_saturate_instead_of_overflowing() {
        let events = [
            event(0, 1),
            event(0, i64::MAX),
            event(2, i64::MIN),
            event(2, i64::MIN),
            event(3, i64::MIN),
        ];

        let result = simulate(0, &events, 5, today());

        assert_eq!(result.daily_curve[0].balance, i64::MAX);
        assert_eq!(result.daily_curve[1].balance, i64::MAX);
        assert_eq!(result.daily_curve[2].balance, -1);
        assert_eq!(result.daily_curve[3].balance, i64::MIN);
        assert_eq!(result.worst_point.balance, i64::MIN);
        assert_eq!(result.worst_point.date, result.daily_curve[3].date);
        assert_eq!(result.safe_to_spend, 0);
        assert_eq!(result.monthly_net_cashflow[0].net, i64::MIN);
    }

    #[test]
    fn events_outside_the_window_are_ignored() {
        let before = ForecastEvent::new(
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            -999,
            "old",
            SourceType::Invoice,
            "old",
        );

        let result = simulate(0, &[before, event(40, -1)], 30, today());

        assert!(result.daily_curve.iter().all(|day| day.balance == 0));
    }
}
