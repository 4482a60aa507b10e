// Scripted collaborators for unit tests: a keyboard that replays answers
// and a backend that replays responses while recording every request.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::TempDir;

use crate::api::{CalorieService, DailyLog, DailyStatus, EnrollmentPayload, Enrollment, EntryPayload};
use crate::config::{Config, CONFIG_FILENAME};
use crate::context::Context;
use crate::error::{ClientError, Result};
use crate::prompt::Prompter;
use crate::session::Session;

#[derive(Debug, Clone)]
pub enum Answer {
    Key(char),
    Text(&'static str),
    Int(u32),
    Decimal(f64),
}

#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    /// Every prompt shown, in order. Key reads are recorded as `<key>`.
    pub prompts: Vec<String>,
    pub edited: Vec<PathBuf>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        ScriptedPrompter {
            answers: answers.into(),
            ..Default::default()
        }
    }

    fn next(&mut self, prompt: &str) -> Answer {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("script ran out of answers at {prompt:?}"))
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    /// An exhausted script behaves like Ctrl-C so menu loops end.
    fn read_key(&mut self) -> Result<char> {
        self.prompts.push("<key>".into());
        match self.answers.pop_front() {
            Some(Answer::Key(c)) => Ok(c),
            Some(other) => panic!("expected a key, script has {other:?}"),
            None => Err(ClientError::Interrupted),
        }
    }

    fn text(&mut self, prompt: &str, _allow_empty: bool) -> Result<String> {
        match self.next(prompt) {
            Answer::Text(s) => Ok(s.to_string()),
            other => panic!("expected text for {prompt:?}, script has {other:?}"),
        }
    }

    fn integer(&mut self, prompt: &str) -> Result<u32> {
        match self.next(prompt) {
            Answer::Int(n) => Ok(n),
            other => panic!("expected integer for {prompt:?}, script has {other:?}"),
        }
    }

    fn decimal(&mut self, prompt: &str) -> Result<f64> {
        match self.next(prompt) {
            Answer::Decimal(n) => Ok(n),
            Answer::Int(n) => Ok(f64::from(n)),
            other => panic!("expected decimal for {prompt:?}, script has {other:?}"),
        }
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        self.text(prompt, false)
    }

    fn edit_file(&mut self, path: &Path) -> Result<()> {
        self.edited.push(path.to_path_buf());
        Ok(())
    }
}

/// Backend double. Empty queues fall back to a benign default, except
/// enrollment which must be scripted.
#[derive(Default)]
pub struct ScriptedService {
    pub enrollments: RefCell<VecDeque<Enrollment>>,
    pub submitted: RefCell<Vec<EnrollmentPayload>>,
    pub tokens: RefCell<VecDeque<Result<String>>>,
    pub logins: RefCell<Vec<(String, String)>>,
    pub entry_results: RefCell<VecDeque<Result<()>>>,
    pub entries: RefCell<Vec<EntryPayload>>,
    pub statuses: RefCell<VecDeque<Result<Option<DailyStatus>>>>,
    pub status_dates: RefCell<Vec<NaiveDate>>,
    pub logs: RefCell<VecDeque<Result<Vec<DailyLog>>>>,
}

impl CalorieService for ScriptedService {
    fn create_user(&self, payload: &EnrollmentPayload) -> Result<Enrollment> {
        self.submitted.borrow_mut().push(payload.clone());
        Ok(self
            .enrollments
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected enrollment submission")))
    }

    fn obtain_token(&self, username: &str, password: &str) -> Result<String> {
        self.logins
            .borrow_mut()
            .push((username.to_string(), password.to_string()));
        self.tokens
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok("token".into()))
    }

    fn create_entry(&self, payload: &EntryPayload, _token: &str) -> Result<()> {
        self.entries.borrow_mut().push(payload.clone());
        self.entry_results.borrow_mut().pop_front().unwrap_or(Ok(()))
    }

    fn daily_status(&self, date: NaiveDate, _token: &str) -> Result<Option<DailyStatus>> {
        self.status_dates.borrow_mut().push(date);
        self.statuses.borrow_mut().pop_front().unwrap_or(Ok(None))
    }

    fn recent_log(&self, _token: &str) -> Result<Vec<DailyLog>> {
        self.logs.borrow_mut().pop_front().unwrap_or(Ok(Vec::new()))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Owns the prompter, captured output and a throwaway config file.
pub struct Harness {
    pub prompter: ScriptedPrompter,
    pub out: Vec<u8>,
    pub config_path: PathBuf,
    _dir: TempDir,
}

impl Harness {
    pub fn new(answers: Vec<Answer>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        Harness {
            prompter: ScriptedPrompter::new(answers),
            out: Vec::new(),
            config_path: dir.path().join(CONFIG_FILENAME),
            _dir: dir,
        }
    }

    /// A logged-out session parked on 2016-05-11.
    pub fn session(&self) -> Session {
        Session::new(date(2016, 5, 11))
    }

    pub fn signed_in(&self) -> Session {
        let mut s = self.session();
        s.username = Some("ben".into());
        s.token = Some("token".into());
        s
    }

    pub fn context<'a>(&'a mut self, service: &'a ScriptedService) -> Context<'a> {
        Context::new(
            service,
            &mut self.prompter,
            &mut self.out,
            Config::default(),
            &self.config_path,
        )
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}
