use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SITE_ROOT: &str = "./site";
const DEFAULT_STATE_PATH: &str = "./.chasqui-state.json";
const DEFAULT_ENTRY_URL: &str = "http://localhost/index.html";
const DEFAULT_FADE_OUT_MS: u64 = 260;
const DEFAULT_TRANSITION_MS: u64 = 280;
const DEFAULT_ALERT_HIDE_MS: u64 = 4500;
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.12;

#[derive(Clone, Debug)]
pub struct RouterConfig {
    /// A local directory or an `http(s)://` origin holding the fragments.
    pub site_root: String,
    pub state_path: PathBuf,
    pub routes_file: Option<PathBuf>,
    /// Location the headless session starts at.
    pub entry_url: String,
    /// Delay between starting the fade-out and swapping content.
    pub fade_out: Duration,
    /// Length of the CSS opacity transition put on the content region.
    pub transition: Duration,
    pub alert_hide: Duration,
    pub reveal_threshold: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            site_root: DEFAULT_SITE_ROOT.to_string(),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            routes_file: None,
            entry_url: DEFAULT_ENTRY_URL.to_string(),
            fade_out: Duration::from_millis(DEFAULT_FADE_OUT_MS),
            transition: Duration::from_millis(DEFAULT_TRANSITION_MS),
            alert_hide: Duration::from_millis(DEFAULT_ALERT_HIDE_MS),
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
        }
    }
}

impl RouterConfig {
    pub fn from_env() -> Self {
        let site_root =
            std::env::var("SITE_ROOT").unwrap_or_else(|_| DEFAULT_SITE_ROOT.to_string());

        let state_path = PathBuf::from(
            std::env::var("STATE_PATH").unwrap_or_else(|_| DEFAULT_STATE_PATH.to_string()),
        );

        let routes_file = std::env::var("ROUTES_FILE").ok().map(PathBuf::from);

        let entry_url =
            std::env::var("ENTRY_URL").unwrap_or_else(|_| DEFAULT_ENTRY_URL.to_string());

        let reveal_threshold = std::env::var("REVEAL_THRESHOLD")
            .ok()
            .and_then(|val| val.parse::<f64>().ok())
            .filter(|t| (0.0..=1.0).contains(t))
            .unwrap_or(DEFAULT_REVEAL_THRESHOLD);

        Self {
            site_root,
            state_path,
            routes_file,
            entry_url,
            fade_out: millis_from_env("FADE_OUT_MS", DEFAULT_FADE_OUT_MS),
            transition: millis_from_env("TRANSITION_MS", DEFAULT_TRANSITION_MS),
            alert_hide: millis_from_env("ALERT_HIDE_MS", DEFAULT_ALERT_HIDE_MS),
            reveal_threshold,
        }
    }

    /// CSS transition applied to the content region while it fades.
    pub fn transition_css(&self) -> String {
        format!("opacity {:.2}s ease", self.transition.as_secs_f64())
    }
}

fn millis_from_env(key: &str, default: u64) -> Duration {
    let ms = std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_millis(ms)
}
