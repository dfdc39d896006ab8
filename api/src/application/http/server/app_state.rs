use std::sync::Arc;

use nutrisnap_core::application::NutrisnapService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: NutrisnapService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: NutrisnapService) -> Self {
        Self { args, service }
    }
}
