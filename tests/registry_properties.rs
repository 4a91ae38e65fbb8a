//! Behavioural properties of the trace registry.

use std::sync::{Arc, Barrier};
use std::thread;

use tracer::{MemoryListener, RegistrySettings, SourceIdentity, TraceRegistry};

mod common;

use common::CountingFactory;

#[test]
fn test_channel_count_matches_segments() {
    let registry = TraceRegistry::default();
    for name in ["Solo", "a.B", "a.b.c.D", "x.y.z.w.v.Leaf"] {
        let identity = SourceIdentity::new(name);
        let source = registry.get_source_for(&identity).unwrap();
        assert_eq!(source.channels().len(), name.split('.').count());
        assert_eq!(source.channel_names(), identity.cumulative_names());
    }
}

#[test]
fn test_fixture_scenario_four_channels() {
    let registry = TraceRegistry::default();
    let source = registry.source_named("A.B.C.TracerFixture").unwrap();
    assert_eq!(
        source.channel_names(),
        vec!["A", "A.B", "A.B.C", "A.B.C.TracerFixture"]
    );
}

#[test]
fn test_single_segment_scenario() {
    let registry = TraceRegistry::default();
    let source = registry.source_named("TracerFixture").unwrap();
    assert_eq!(source.channel_names(), vec!["TracerFixture"]);
}

#[test]
fn test_concurrent_lookups_publish_one_source() {
    const THREADS: usize = 16;

    let factory = CountingFactory::default();
    let registry = TraceRegistry::with_factory(RegistrySettings::default(), factory.clone());
    let identity = SourceIdentity::new("A.B.C.Contended");
    let barrier = Barrier::new(THREADS);
    let (registry_ref, identity_ref, barrier_ref) = (&registry, &identity, &barrier);

    let sources: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(move |_| {
                scope.spawn(move || {
                    barrier_ref.wait();
                    registry_ref.get_source_for(identity_ref).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(sources.iter().all(|s| Arc::ptr_eq(s, &sources[0])));
    for name in identity.cumulative_names() {
        assert_eq!(factory.count(&name), 1, "channel {} built more than once", name);
    }
    assert_eq!(factory.total(), 4);
}

#[test]
fn test_concurrent_overlapping_identities_share_channels() {
    const THREADS: usize = 8;

    let factory = CountingFactory::default();
    let registry = TraceRegistry::with_factory(RegistrySettings::default(), factory.clone());
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for i in 0..THREADS {
            let registry = &registry;
            let barrier = &barrier;
            scope.spawn(move || {
                barrier.wait();
                registry
                    .source_named(&format!("root.shared.Component{}", i % 4))
                    .unwrap();
            });
        }
    });

    assert_eq!(factory.count("root"), 1);
    assert_eq!(factory.count("root.shared"), 1);
    assert_eq!(registry.source_count(), 4);
    assert_eq!(factory.total(), 6);
}

#[test]
fn test_listener_added_during_creation_attached_once() {
    const ROUNDS: usize = 50;

    for round in 0..ROUNDS {
        let registry = TraceRegistry::default();
        let memory = Arc::new(MemoryListener::new("mem"));
        let barrier = Barrier::new(2);
        let root = format!("race{}", round);
        let name = format!("{}.Component", root);

        thread::scope(|scope| {
            scope.spawn(|| {
                barrier.wait();
                registry.add_listener(&root, memory.clone());
            });
            scope.spawn(|| {
                barrier.wait();
                registry.source_named(&name).unwrap();
            });
        });

        let channel = registry.channel(&root).unwrap();
        assert_eq!(channel.listener_count(), 1);
    }
}

/// Properties that need events to reach listeners.
#[cfg(feature = "trace")]
mod delivery {
    use std::sync::{Arc, Mutex};

    use tracer::{EventType, MemoryListener, SourceLevel, TraceRegistry};

    use crate::common::OrderListener;

    #[test]
    fn test_two_listeners_each_invoked_once() {
        let registry = TraceRegistry::default();
        let first = Arc::new(MemoryListener::new("first"));
        let second = Arc::new(MemoryListener::new("second"));
        registry.add_listener("A.B", first.clone());
        registry.add_listener("A.B", second.clone());

        let source = registry.source_named("A.B.C.Component").unwrap();
        source.trace_information("one call");

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_fan_out_is_root_to_leaf_then_attachment_order() {
        let registry = TraceRegistry::default();
        let log = Arc::new(Mutex::new(Vec::new()));

        registry.add_listener("A.B.Leaf", OrderListener::new("leaf", &log));
        registry.add_listener("A", OrderListener::new("root1", &log));
        registry.add_listener("A", OrderListener::new("root2", &log));
        let source = registry.source_named("A.B.Leaf").unwrap();
        registry.add_listener("A.B", OrderListener::new("mid", &log));

        source.trace_warning("ordered");
        assert_eq!(
            *log.lock().unwrap(),
            vec!["root1@A", "root2@A", "mid@A.B", "leaf@A.B.Leaf"]
        );
    }

    #[test]
    fn test_level_change_reaches_old_and_new_sources() {
        let registry = TraceRegistry::default();
        let memory = Arc::new(MemoryListener::new("mem"));
        registry.add_listener("svc", memory.clone());

        let old = registry.source_named("svc.Old").unwrap();
        old.trace_event_message(EventType::Verbose, 1, "hidden");
        assert!(memory.is_empty());

        registry.set_logging_level("svc", SourceLevel::Verbose);
        let new = registry.source_named("svc.New").unwrap();
        old.trace_event_message(EventType::Verbose, 2, "old");
        new.trace_event_message(EventType::Verbose, 3, "new");
        assert_eq!(memory.messages(), vec!["old", "new"]);

        registry.set_logging_level("svc", SourceLevel::Off);
        old.trace_event_message(EventType::Critical, 4, "muted");
        assert_eq!(memory.len(), 2);
    }
}

#[cfg(not(feature = "trace"))]
#[test]
fn test_compiled_out_tracing_delivers_nothing() {
    use std::cell::Cell;

    let registry = TraceRegistry::default();
    let memory = Arc::new(MemoryListener::new("mem"));
    registry.add_listener("A", memory.clone());
    let source = registry.source_named("A.Component").unwrap();

    let evaluated = Cell::new(0);
    let touch = || {
        evaluated.set(evaluated.get() + 1);
        "arg"
    };

    source.trace_information("plain");
    tracer::trace_info!(source, "{}", touch());
    tracer::trace_data!(source, tracer::EventType::Information, 1, serde_json::json!(touch()));

    assert!(!tracer::TRACE_ENABLED);
    assert_eq!(registry.channel("A").unwrap().listener_count(), 1);
    assert!(memory.is_empty());
    assert_eq!(evaluated.get(), 0);
}
