use server_api::ApiContext;
use storage::Storage;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) storage: Storage,
}

impl AppState {
    pub(crate) fn new(storage: Storage) -> Self {
        Self {
            api: ApiContext::new(storage.clone()),
            storage,
        }
    }
}
