use std::fmt;

/// Address of the driver's feedback websocket.
///
/// The driver always runs on the local machine; the default matches its
/// fixed loopback endpoint. Host and port are overridable mainly so tests
/// can stand in a fake driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverEndpoint {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl DriverEndpoint {
    /// Default driver port.
    pub const DEFAULT_PORT: u16 = 15881;

    /// Endpoint at the default loopback address.
    pub fn local() -> Self {
        Self::default()
    }

    /// Endpoint at an explicit host/port, keeping the standard path.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            path: "/v2/feedbacks".to_string(),
        }
    }

    /// The full `ws://` URL.
    pub fn url(&self) -> String {
        format!("ws://{}:{}{}", self.host, self.port, self.path)
    }
}

impl Default for DriverEndpoint {
    fn default() -> Self {
        Self::new("127.0.0.1", Self::DEFAULT_PORT)
    }
}

impl fmt::Display for DriverEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}
