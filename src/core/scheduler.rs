//! Cron-based scheduler for DCA runs

use crate::config::ConfigError;
use crate::core::dca::{DcaExecutor, DcaOutcome};
use chrono::Local;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Accept both the 5-field (minute first) and the 6/7-field (seconds first)
/// cron layouts.
///
/// 5-field expressions fire at second 0 and use the classic day-of-week
/// numbering (0 or 7 = Sunday, 1 = Monday). 6/7-field expressions are passed
/// through unchanged.
pub fn parse_schedule(expression: &str) -> Result<Schedule, ConfigError> {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    let normalized = match fields.as_slice() {
        [minute, hour, day, month, weekday] => format!(
            "0 {} {} {} {} {}",
            minute,
            hour,
            day,
            month,
            classic_weekdays(weekday)
        ),
        _ => fields.join(" "),
    };

    Schedule::from_str(&normalized).map_err(|e| ConfigError::InvalidSchedule {
        expression: expression.to_string(),
        reason: e.to_string(),
    })
}

/// Rewrite numeric weekdays as names so `1` keeps meaning Monday. Step
/// values after `/` are counts, not days, and stay numeric.
fn classic_weekdays(field: &str) -> String {
    const NAMES: [&str; 8] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

    let name = |part: &str| match part.parse::<usize>() {
        Ok(day) if day < NAMES.len() => NAMES[day].to_string(),
        _ => part.to_string(),
    };

    field
        .split(',')
        .map(|item| {
            let (range, step) = match item.split_once('/') {
                Some((range, step)) => (range, Some(step)),
                None => (item, None),
            };
            let range = range.split('-').map(name).collect::<Vec<_>>().join("-");
            match step {
                Some(step) => format!("{}/{}", range, step),
                None => range,
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Scheduler that runs the DCA executor on every cron tick
pub struct DcaScheduler {
    executor: Arc<DcaExecutor>,
    schedule: Schedule,
    expression: String,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl DcaScheduler {
    pub fn new(executor: Arc<DcaExecutor>, expression: &str) -> Result<Self, ConfigError> {
        let schedule = parse_schedule(expression)?;

        info!(cron = %expression, "DcaScheduler: created with cron '{}'", expression);

        Ok(Self {
            executor,
            schedule,
            expression: expression.to_string(),
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Next tick in local time, if the schedule has one.
    pub fn next_run(&self) -> Option<chrono::DateTime<Local>> {
        self.schedule.upcoming(Local).next()
    }

    /// Start the scheduler
    pub async fn start(&self) {
        let executor = self.executor.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("DcaScheduler: started, waiting for cron schedule...");

            loop {
                let Some(next_tick) = schedule.upcoming(Local).next() else {
                    error!("DcaScheduler: schedule has no upcoming ticks, stopping");
                    break;
                };

                let now = Local::now();
                if next_tick > now {
                    let duration = (next_tick - now).to_std().unwrap_or_default();
                    tokio::time::sleep(duration).await;
                }

                info!(tick = %next_tick, "DcaScheduler: cron tick, executing DCA");

                match executor.execute().await {
                    Ok(DcaOutcome::Executed(exchange)) => info!(
                        quote_id = %exchange.quote_id,
                        amount = exchange.amount,
                        multiplier = exchange.multiplier,
                        "DcaScheduler: exchange executed"
                    ),
                    Ok(DcaOutcome::Skipped(reason)) => {
                        info!(reason = ?reason, "DcaScheduler: run skipped")
                    }
                    Err(e) => error!(error = %e, "Error executing DCA"),
                }
            }
        });

        let mut h = self.handle.write().await;
        if let Some(previous) = h.replace(handle) {
            previous.abort();
        }

        info!("DcaScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("DcaScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}
