// Collaborators shared by every command: the backend, the keyboard, the
// screen and the config file. Built once at startup and threaded through
// each call next to the `Session`.

use std::io::Write;
use std::path::Path;

use crate::api::CalorieService;
use crate::config::Config;
use crate::prompt::Prompter;

pub struct Context<'a> {
    pub service: &'a dyn CalorieService,
    pub prompter: &'a mut dyn Prompter,
    pub out: &'a mut dyn Write,
    pub config: Config,
    pub config_path: &'a Path,
}

impl<'a> Context<'a> {
    pub fn new(
        service: &'a dyn CalorieService,
        prompter: &'a mut dyn Prompter,
        out: &'a mut dyn Write,
        config: Config,
        config_path: &'a Path,
    ) -> Self {
        Context {
            service,
            prompter,
            out,
            config,
            config_path,
        }
    }
}
