use dbx_apps::DirectoryFactory;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub directories: Arc<dyn DirectoryFactory>,
}

impl AppState {
    pub fn new(directories: impl DirectoryFactory + 'static) -> Self {
        Self {
            directories: Arc::new(directories),
        }
    }
}
