use roster_business::{BusinessConfig, build_state_ctx};
use roster_states::StateCtx;

/// Everything the app renders from.
pub struct State {
    pub ctx: StateCtx,
    /// The list is fetched once on the first frame; later loads are explicit.
    pub initial_load_requested: bool,
}

impl Default for State {
    fn default() -> Self {
        Self::with_config(BusinessConfig::load())
    }
}

impl State {
    pub fn with_config(config: BusinessConfig) -> Self {
        Self {
            ctx: build_state_ctx(config),
            initial_load_requested: false,
        }
    }

    pub fn test(base_url: String) -> Self {
        Self::with_config(BusinessConfig::new(base_url))
    }
}
