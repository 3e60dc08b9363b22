//! # Test Fixtures
//!
//! Components that record every call into a shared log, plus builders for
//! the two pipelines over an in-memory property store.

use std::sync::Arc;

use parking_lot::Mutex;
use rg_01_required_gate::InMemoryPropertyStore;
use rg_02_packet_interception::{
    DomainLocality, Flow, PacketInterceptionService, PacketInterceptor, RequiredPacketInterceptor,
};
use rg_03_room_events::{RequiredRoomListener, RoomEventDispatcher, RoomEventListener};
use shared_types::{
    ComponentFault, Condition, Jid, Packet, Rejection, RoomEvent, Session, TraversalPoint,
};

/// Domain served by the pipelines built here.
pub const DOMAIN: &str = "example.org";

/// Ordered record of component calls, shared between components.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Entries of `log`, in call order.
pub fn entries(log: &CallLog) -> Vec<String> {
    log.lock().clone()
}

/// Session of a local user.
pub fn local_session(node: &str) -> Session {
    Session::new(Jid::bare(node, DOMAIN).with_resource("desktop"))
}

/// Session of a user on another server.
pub fn remote_session(node: &str) -> Session {
    Session::new(Jid::bare(node, "elsewhere.net"))
}

pub fn packet_service(store: Arc<InMemoryPropertyStore>) -> PacketInterceptionService {
    PacketInterceptionService::load(store, Arc::new(DomainLocality::new(DOMAIN)))
        .expect("in-memory store never fails to load")
}

pub fn room_dispatcher(store: Arc<InMemoryPropertyStore>) -> RoomEventDispatcher {
    RoomEventDispatcher::load(store).expect("in-memory store never fails to load")
}

/// Required interceptor that logs `"<name>@<point>"`.
pub struct RecordingRequired {
    pub name: &'static str,
    pub log: CallLog,
    pub swallow: bool,
}

impl RecordingRequired {
    pub fn new(name: &'static str, log: &CallLog) -> Self {
        Self {
            name,
            log: Arc::clone(log),
            swallow: false,
        }
    }
}

impl RequiredPacketInterceptor for RecordingRequired {
    fn intercept(
        &self,
        _packet: &mut Packet,
        _session: &Session,
        point: TraversalPoint,
    ) -> Result<Flow, ComponentFault> {
        self.log.lock().push(format!("{}@{}", self.name, point));
        Ok(if self.swallow {
            Flow::Swallow
        } else {
            Flow::Continue
        })
    }
}

/// Best-effort interceptor that logs `"<name>@<point>"` and optionally
/// rejects everything.
pub struct RecordingInterceptor {
    pub name: &'static str,
    pub log: CallLog,
    pub reject: bool,
}

impl RecordingInterceptor {
    pub fn new(name: &'static str, log: &CallLog) -> Self {
        Self {
            name,
            log: Arc::clone(log),
            reject: false,
        }
    }

    pub fn rejecting(name: &'static str, log: &CallLog) -> Self {
        Self {
            reject: true,
            ..Self::new(name, log)
        }
    }
}

impl PacketInterceptor for RecordingInterceptor {
    fn intercept(
        &self,
        _packet: &mut Packet,
        _session: &Session,
        point: TraversalPoint,
    ) -> Result<(), ComponentFault> {
        self.log.lock().push(format!("{}@{}", self.name, point));
        if self.reject {
            return Err(Rejection::new(Condition::PolicyViolation)
                .with_reason(format!("{} says no", self.name))
                .into());
        }
        Ok(())
    }

    fn label(&self) -> &str {
        self.name
    }
}

/// Room listener that logs `"<name>:before:<event>"` and
/// `"<name>:event:<event>"`.
pub struct RecordingListener {
    pub name: &'static str,
    pub log: CallLog,
    pub handles: bool,
}

impl RecordingListener {
    pub fn new(name: &'static str, log: &CallLog) -> Self {
        Self {
            name,
            log: Arc::clone(log),
            handles: false,
        }
    }

    pub fn handling(name: &'static str, log: &CallLog) -> Self {
        Self {
            handles: true,
            ..Self::new(name, log)
        }
    }
}

impl RoomEventListener for RecordingListener {
    fn on_event(&self, event: &RoomEvent) {
        self.log
            .lock()
            .push(format!("{}:event:{}", self.name, event.name()));
    }

    fn label(&self) -> &str {
        self.name
    }
}

impl RequiredRoomListener for RecordingListener {
    fn before(&self, event: &RoomEvent) -> Result<bool, ComponentFault> {
        self.log
            .lock()
            .push(format!("{}:before:{}", self.name, event.name()));
        Ok(self.handles)
    }
}
