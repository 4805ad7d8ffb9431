use core::ops::Deref;

use sotags_core::gateways::pacer::RequestPacer;

use super::TagSourceFactory;

pub struct Version(pub &'static str);

pub struct TagSources(pub TagSourceFactory);

pub struct Pacer(pub std::sync::Arc<dyn RequestPacer + Send + Sync>);

impl Deref for Pacer {
    type Target = dyn RequestPacer;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
