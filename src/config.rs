#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    pub store_path: String,
    pub http_timeout_secs: u64,
    pub top_projects: usize,
    pub top_skills: usize,
    pub chart_width: f64,
    pub chart_height: f64,
    pub chart_padding: f64,
    pub charts_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("PLATFORM_BASE").unwrap_or_else(|_| "https://learn.reboot01.com".to_string()),
            store_path: std::env::var("STORE_PATH").unwrap_or_else(|_| "./xpboard.sqlite".to_string()),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(30),
            top_projects: std::env::var("TOP_PROJECTS").ok().and_then(|v| v.parse().ok()).unwrap_or(3),
            top_skills: std::env::var("TOP_SKILLS").ok().and_then(|v| v.parse().ok()).unwrap_or(5),
            chart_width: std::env::var("CHART_W").ok().and_then(|v| v.parse().ok()).unwrap_or(400.0),
            chart_height: std::env::var("CHART_H").ok().and_then(|v| v.parse().ok()).unwrap_or(200.0),
            chart_padding: std::env::var("CHART_PAD").ok().and_then(|v| v.parse().ok()).unwrap_or(20.0),
            charts_dir: std::env::var("CHARTS_DIR").unwrap_or_else(|_| "./charts".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let cfg = Config::from_env();
        assert!(cfg.chart_width > 2.0 * cfg.chart_padding);
        assert!(cfg.chart_height > 2.0 * cfg.chart_padding);
        assert!(cfg.top_projects > 0);
        assert!(cfg.top_skills > 0);
    }
}
