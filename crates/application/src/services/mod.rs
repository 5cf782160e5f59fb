mod composite_writer;
mod fan_out_propagator;
mod forward_zone_store;
mod reverse_record_synchronizer;

pub use composite_writer::CompositeForwardZoneWriter;
pub use fan_out_propagator::{FanOutPropagator, PropagatorSettings};
pub use forward_zone_store::ForwardZoneStore;
pub use reverse_record_synchronizer::ReverseRecordSynchronizer;
