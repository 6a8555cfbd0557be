use std::sync::Arc;

use stylebuddy_core::application::StyleBuddyService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: StyleBuddyService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: StyleBuddyService) -> Self {
        Self { args, service }
    }
}
