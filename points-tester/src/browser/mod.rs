pub mod page;
pub mod scenarios;
pub mod session;

pub use page::{MessageState, ModalPage};
pub use scenarios::{BROWSER_SCENARIOS, BrowserScenario, ScenarioCtx, find_browser_scenario};
pub use session::{BrowserConfig, BrowserKind, new_session};
