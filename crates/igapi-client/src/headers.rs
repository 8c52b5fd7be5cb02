//! Headers sent with every request, shaped like the Android app's.

use rand::Rng;

use crate::config::ClientConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultHeaders {
    connection_speed_kbps: u32,
}

impl DefaultHeaders {
    /// The advertised connection speed is picked once per client.
    pub(crate) fn new() -> Self {
        Self {
            connection_speed_kbps: rand::thread_rng().gen_range(1000..=5000),
        }
    }

    pub(crate) fn render(&self, config: &ClientConfig, user_agent: &str) -> Vec<(String, String)> {
        let speed = format!("{}kbps", self.connection_speed_kbps);
        [
            ("User-Agent", user_agent),
            ("Accept-Language", "en-US"),
            ("X-FB-HTTP-Engine", config.fb_http_engine.as_str()),
            ("Connection", "keep-alive"),
            ("X-IG-Connection-Speed", speed.as_str()),
            ("X-IG-Bandwidth-Speed-KBPS", "-1.000"),
            ("X-IG-Bandwidth-TotalBytes-B", "0"),
            ("X-IG-Bandwidth-TotalTime-MS", "0"),
            ("X-IG-Connection-Type", "WIFI"),
            ("X-IG-Capabilities", config.ig_capabilities.as_str()),
            ("X-IG-App-ID", config.application_id.as_str()),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
    }
}
