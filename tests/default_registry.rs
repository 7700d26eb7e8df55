//! The process-wide default resolver.
//!
//! Kept in its own test binary with a single test: the default is built once per process, so splitting these
//! checks across tests would make them depend on execution order.

mod common;

use std::sync::Barrier;
use std::thread;

use common::Student;
use vtag::{EncoderFn, Resolver, VtagError, encoder};

const THREADS: usize = 8;

#[test]
fn default_resolver_is_configured_exactly_once() {
    let encoders: [EncoderFn; 4] = [encoder::underscore, encoder::upper, encoder::lower, encoder::camel];
    let barrier = Barrier::new(THREADS);

    // Half the threads race to install a default, the other half resolve through it at the same time.
    let outcomes: Vec<(bool, Vec<String>)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    let installed = i % 2 == 0 && vtag::init_default(encoders[(i / 2) % encoders.len()]);
                    let names = vtag::resolve::<Student>("", &["list"]).unwrap();
                    (installed, names)
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert!(outcomes.iter().filter(|(installed, _)| *installed).count() <= 1);
    let first = &outcomes[0].1;
    assert!(outcomes.iter().all(|(_, names)| names == first));

    // Later initializations do not replace the established default.
    assert!(!vtag::init_default(encoder::upper));

    let resolver = vtag::default_resolver();
    assert!(std::ptr::eq(resolver, vtag::default_resolver()));
    assert_eq!(resolver.tag_key(), "vtag");
    assert!(resolver.cache().is_some_and(|cache| !cache.is_empty()));

    // Whichever encoder won, the default agrees with a fresh uncached resolver using it.
    let reference = Resolver::new("", resolver.encoder(), false);
    assert_eq!(*first, reference.resolve_type::<Student>("", &["list"]).unwrap());
    assert_eq!(first.len(), 4);
    assert_eq!(first[2..], ["name", "age"]);

    let detail = vtag::resolve_value(&Student::default(), "", &["detail"]).unwrap();
    assert_eq!(detail, reference.resolve_type::<Student>("", &["detail"]).unwrap());

    let err = vtag::resolve::<u32>("", &["list"]).unwrap_err();
    assert!(matches!(err, VtagError::UnsupportedKind { .. }));

    let lookup = vtag::names_to_map(first.clone(), true);
    assert_eq!(lookup.len(), 4);
    assert_eq!(lookup.get(&first[1]), Some(&true));
}
