use tubelink::LookupService;

/// Server state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub lookup: LookupService,
}

impl AppState {
    pub fn new(lookup: LookupService) -> Self {
        Self { lookup }
    }
}
