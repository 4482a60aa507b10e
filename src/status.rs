// Read-only views: today's totals and the recent log. Both hit the server
// every time; nothing is cached between calls.

use std::io::{self, Write};

use chrono::Local;
use colored::Colorize;

use crate::api::{DailyLog, DailyStatus};
use crate::context::Context;
use crate::error::Result;
use crate::session::Session;

/// Show totals for the local calendar day. The session cursor is not
/// consulted: the view always reports today.
pub fn show_status(ctx: &mut Context<'_>, session: &Session) -> Result<()> {
    let today = Local::now().date_naive();
    let token = session.token.as_deref().unwrap_or_default();
    let status = ctx.service.daily_status(today, token)?;
    render_status(&mut *ctx.out, status.as_ref())?;
    Ok(())
}

pub fn render_status(out: &mut dyn Write, status: Option<&DailyStatus>) -> io::Result<()> {
    let Some(status) = status else {
        return writeln!(out, " - No log entries for today.");
    };
    writeln!(out, " - You have eaten {} calories.", status.calories_consumed)?;
    writeln!(
        out,
        " - You have burned off {} calories.",
        status.calories_expended.abs()
    )?;
    let line = match status.calories_remaining {
        None => "No daily calorie goal is set.".yellow(),
        Some(n) if n > 0 => format!("You can eat {n} more calories today.").as_str().green(),
        Some(n) if n < 0 => {
            format!("You have exceeded your goal by {} calories.", n.abs())
                .as_str()
                .red()
        }
        Some(_) => "You are exactly at your calorie goal.".green(),
    };
    writeln!(out, "{line}")
}

pub fn show_log(ctx: &mut Context<'_>, session: &Session) -> Result<()> {
    let token = session.token.as_deref().unwrap_or_default();
    let days = ctx.service.recent_log(token)?;
    render_log(&mut *ctx.out, &days)?;
    Ok(())
}

pub fn render_log(out: &mut dyn Write, days: &[DailyLog]) -> io::Result<()> {
    if days.is_empty() {
        return writeln!(out, " - Nothing logged yet.");
    }
    for day in days {
        let remaining = day
            .calories_remaining
            .map_or_else(|| "n/a".to_string(), |n| n.to_string());
        writeln!(
            out,
            "{}: {} eaten, {} exercised, {} remaining.",
            day.date, day.calories_consumed, day.calories_expended, remaining
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::testing::{date, Harness, ScriptedService};
    use reqwest::StatusCode;

    fn rendered(remaining: Option<i64>) -> String {
        let status = DailyStatus {
            calories_consumed: 1800,
            calories_expended: -300,
            calories_remaining: remaining,
        };
        let mut out = Vec::new();
        render_status(&mut out, Some(&status)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn zero_remaining_is_exactly_at_goal() {
        let text = rendered(Some(0));
        assert!(text.contains("You are exactly at your calorie goal."));
        assert!(!text.contains("more calories"));
    }

    #[test]
    fn positive_remaining_can_eat_more() {
        assert!(rendered(Some(250)).contains("You can eat 250 more calories today."));
    }

    #[test]
    fn negative_remaining_shows_absolute_overage() {
        let text = rendered(Some(-75));
        assert!(text.contains("You have exceeded your goal by 75 calories."));
        assert!(!text.contains("-75"));
    }

    #[test]
    fn expended_calories_are_shown_positive() {
        assert!(rendered(Some(1)).contains("You have burned off 300 calories."));
    }

    #[test]
    fn missing_goal_is_reported() {
        assert!(rendered(None).contains("No daily calorie goal is set."));
    }

    #[test]
    fn no_entries_is_one_informational_line() {
        let service = ScriptedService::default();
        let mut h = Harness::new(vec![]);
        let session = h.signed_in();
        {
            let mut ctx = h.context(&service);
            show_status(&mut ctx, &session).unwrap();
        }
        assert_eq!(h.output(), " - No log entries for today.\n");
    }

    #[test]
    fn status_queries_today_not_the_cursor() {
        let service = ScriptedService::default();
        let mut h = Harness::new(vec![]);
        let session = h.signed_in();
        let mut ctx = h.context(&service);
        show_status(&mut ctx, &session).unwrap();
        let asked = service.status_dates.borrow();
        assert_eq!(asked.len(), 1);
        assert_ne!(asked[0], session.current_date);
    }

    #[test]
    fn other_status_failures_propagate() {
        let service = ScriptedService::default();
        service
            .statuses
            .borrow_mut()
            .push_back(Err(ClientError::UnexpectedStatus {
                endpoint: "/api/daily/".into(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            }));
        let mut h = Harness::new(vec![]);
        let session = h.signed_in();
        let mut ctx = h.context(&service);
        assert!(show_status(&mut ctx, &session).is_err());
    }

    #[test]
    fn log_rows_render_one_line_per_day() {
        let days = vec![
            DailyLog {
                date: date(2016, 5, 11),
                calories_consumed: 100,
                calories_expended: 0,
                calories_remaining: None,
            },
            DailyLog {
                date: date(2016, 5, 10),
                calories_consumed: 2000,
                calories_expended: -400,
                calories_remaining: Some(150),
            },
        ];
        let mut out = Vec::new();
        render_log(&mut out, &days).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "2016-05-11: 100 eaten, 0 exercised, n/a remaining.\n\
             2016-05-10: 2000 eaten, -400 exercised, 150 remaining.\n"
        );
    }
}
