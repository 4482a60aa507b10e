// New-user enrollment. The server is the only authority on whether a
// payload is acceptable (username uniqueness, email format, ...), so the
// client submits, shows what was rejected, asks for replacements and
// resubmits the whole payload until it is accepted.

use std::io::Write;

use crate::api::{Enrollment, EnrollmentPayload, Gender, Profile, UserRecord};
use crate::auth;
use crate::context::Context;
use crate::error::{ClientError, Result};
use crate::session::Session;

/// Physical activity factors offered by the activity-level menu, 1 to 5.
pub const ACTIVITY_FACTORS: [f64; 5] = [1.2, 1.375, 1.55, 1.725, 1.9];

const ACTIVITY_LEVELS: [&str; 5] = [
    "Sedentary",
    "Lightly Active",
    "Moderately Active",
    "Very Active",
    "Extra Active",
];

/// Weekly pounds to lose, spread over a day and rounded to 3 places.
pub fn daily_weight_goal(weekly: f64) -> f64 {
    (weekly / 7.0 * 1000.0).round() / 1000.0
}

impl EnrollmentPayload {
    /// Current value of a field, as shown next to its rejection. `None`
    /// for fields the payload does not carry.
    pub fn field_value(&self, field: &str) -> Option<String> {
        let value = match field {
            "username" => self.username.clone(),
            "email" => self.email.clone(),
            "password" => "********".to_string(),
            "daily_weight_goal" => self.daily_weight_goal.to_string(),
            "height" => self.height.to_string(),
            "weight" => self.weight.to_string(),
            "activity_factor" => self.activity_factor.to_string(),
            "gender" => format!("{:?}", self.profile.gender),
            "birthdate" => self.profile.birthdate.clone(),
            "auto_update_goal" => self.profile.auto_update_goal.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Overwrite one field from user input. The error is a message to
    /// show before asking again.
    pub fn set_field(&mut self, field: &str, raw: &str) -> std::result::Result<(), String> {
        let raw = raw.trim();
        let bad = |kind: &str| format!("{field} must be {kind}.");
        match field {
            "username" => self.username = raw.to_string(),
            "email" => self.email = raw.to_string(),
            "password" => self.password = raw.to_string(),
            "birthdate" => self.profile.birthdate = raw.to_string(),
            "daily_weight_goal" => {
                self.daily_weight_goal = raw.parse().map_err(|_| bad("a number"))?
            }
            "activity_factor" => {
                self.activity_factor = raw.parse().map_err(|_| bad("a number"))?
            }
            "height" => self.height = raw.parse().map_err(|_| bad("a whole number"))?,
            "weight" => self.weight = raw.parse().map_err(|_| bad("a whole number"))?,
            "gender" => {
                self.profile.gender = match raw.to_ascii_uppercase().as_str() {
                    "M" => Gender::M,
                    "F" => Gender::F,
                    _ => return Err(bad("m or f")),
                }
            }
            "auto_update_goal" => {
                self.profile.auto_update_goal = match raw.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "y" => true,
                    "false" | "no" | "n" => false,
                    _ => return Err(bad("yes or no")),
                }
            }
            _ => return Err(format!("{field} cannot be changed here.")),
        }
        Ok(())
    }
}

/// Submit `payload` until the server accepts it, asking the user to
/// replace every rejected field between rounds. There is no retry limit.
pub fn negotiate(ctx: &mut Context<'_>, payload: &mut EnrollmentPayload) -> Result<UserRecord> {
    let mut round = 0u32;
    loop {
        let errors = match ctx.service.create_user(payload)? {
            Enrollment::Accepted(record) => return Ok(record),
            Enrollment::Rejected(errors) => errors,
        };
        round += 1;
        tracing::info!(round, fields = errors.fields.len(), "enrollment rejected");

        let unknown: Vec<String> = errors
            .fields
            .iter()
            .filter(|f| payload.field_value(&f.field).is_none())
            .map(|f| f.field.clone())
            .collect();
        if !unknown.is_empty() {
            for f in &errors.fields {
                writeln!(ctx.out, "{}: {}", f.field, f.messages.join(", "))?;
            }
            return Err(ClientError::UnhandledValidation { fields: unknown });
        }

        for f in &errors.fields {
            let shown = payload.field_value(&f.field).unwrap_or_default();
            writeln!(
                ctx.out,
                "Invalid {} ({}): {}",
                f.field,
                shown,
                f.messages.join(", ")
            )?;
            let prompt = format!("Enter another {}", f.field);
            loop {
                let raw = if f.field == "password" {
                    ctx.prompter.password(&prompt)?
                } else {
                    ctx.prompter.text(&prompt, false)?
                };
                match payload.set_field(&f.field, &raw) {
                    Ok(()) => break,
                    Err(msg) => writeln!(ctx.out, "{msg}")?,
                }
            }
        }
    }
}

fn read_password(ctx: &mut Context<'_>) -> Result<String> {
    loop {
        let password = ctx.prompter.password("Choose a password")?;
        let confirm = ctx.prompter.password("Confirm password")?;
        if password == confirm {
            return Ok(password);
        }
        writeln!(ctx.out, "Passwords do not match. Try again.")?;
    }
}

fn read_activity_factor(ctx: &mut Context<'_>) -> Result<f64> {
    writeln!(
        ctx.out,
        "Activity Level (https://en.wikipedia.org/wiki/Physical_activity_level)"
    )?;
    writeln!(ctx.out)?;
    for (i, level) in ACTIVITY_LEVELS.iter().enumerate() {
        writeln!(ctx.out, "  {}. {}", i + 1, level)?;
    }
    writeln!(ctx.out)?;
    write!(ctx.out, "Enter your activity level: ")?;
    ctx.out.flush()?;
    loop {
        let key = ctx.prompter.read_key()?;
        let level = key.to_digit(10).map(|d| d as usize);
        match level.and_then(|d| d.checked_sub(1)).and_then(|i| ACTIVITY_FACTORS.get(i)) {
            Some(factor) => return Ok(*factor),
            None => writeln!(ctx.out, "Invalid option. Enter 1-5.")?,
        }
    }
}

fn read_gender(ctx: &mut Context<'_>) -> Result<Gender> {
    write!(ctx.out, "Gender (m/f): ")?;
    ctx.out.flush()?;
    loop {
        match ctx.prompter.read_key()?.to_ascii_uppercase() {
            'M' => return Ok(Gender::M),
            'F' => return Ok(Gender::F),
            _ => writeln!(ctx.out, "Invalid option. Enter m or f.")?,
        }
    }
}

/// Ask for everything a new account needs.
pub fn collect_payload(ctx: &mut Context<'_>) -> Result<EnrollmentPayload> {
    let username = ctx.prompter.text("Choose a username", false)?;
    let email = ctx.prompter.text("Enter your email", false)?;
    let password = read_password(ctx)?;
    let weekly = ctx
        .prompter
        .decimal("How many pounds do you want to lose per week? (Usually between 1.0 and 2.0)")?;
    writeln!(ctx.out)?;
    writeln!(
        ctx.out,
        "The following questions are only used to calculate your basic metabolic rate \
         and figure out how many calories you should be eating per day."
    )?;
    writeln!(ctx.out)?;
    let activity_factor = read_activity_factor(ctx)?;
    writeln!(ctx.out)?;
    let gender = read_gender(ctx)?;
    let birthdate = ctx.prompter.text("Enter your birthdate (YYYY-MM-DD)", false)?;
    let height = i64::from(ctx.prompter.integer("Enter your height (in inches)")?);
    let weight = i64::from(ctx.prompter.integer("Enter your weight (in pounds)")?);
    writeln!(ctx.out)?;
    Ok(EnrollmentPayload {
        username,
        email,
        password,
        daily_weight_goal: daily_weight_goal(weekly),
        height,
        weight,
        activity_factor,
        profile: Profile {
            gender,
            birthdate,
            auto_update_goal: true,
        },
    })
}

/// Full new-user flow: collect, negotiate, then log in with the chosen
/// password. The password is dropped once the token is in hand.
pub fn enrollment(ctx: &mut Context<'_>, session: &mut Session) -> Result<()> {
    let mut payload = collect_payload(ctx)?;
    let record = negotiate(ctx, &mut payload)?;

    session.username = Some(payload.username.clone());
    auth::retrieve_token(ctx, session, &payload.password)?;
    payload.password.clear();
    drop(payload);

    writeln!(
        ctx.out,
        "User: {} created. Your daily calorie goal is: {}",
        record.username, record.profile.current_calorie_goal
    )?;
    writeln!(ctx.out)?;
    writeln!(
        ctx.out,
        "You are now ready to start logging. Simply run 'bogg' from your command line to start logging!"
    )?;
    Ok(())
}
