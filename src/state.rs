use crate::counter::Counter;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub counter: Arc<Counter>,
}

impl AppState {
    pub fn new(counter: Counter) -> Self {
        Self {
            counter: Arc::new(counter),
        }
    }
}
