use campaign_dispatcher::dispatch_settings::DispatchSettings;
use campaign_dispatcher::environment::Environment;
use std::net::SocketAddr;

pub struct WorkerSettings {
    pub port: u16,
    pub dispatch: DispatchSettings,
    /// Shared secret the bridge must send in `x-bridge-token` when posting session events.
    pub bridge_token: Option<String>,
}

impl WorkerSettings {
    pub fn from_env() -> Self {
        Self {
            port: Environment::u16("PORT", 3000),
            dispatch: DispatchSettings::from_env(),
            bridge_token: Environment::optional_string("BRIDGE_EVENTS_TOKEN"),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
