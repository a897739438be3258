use geography::{
    mercator_factory, spherical_factory, FactoryConfig, FactoryRegistry, GeographyError,
    StrategyKind,
};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 16;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn concurrent_first_access_creates_one_factory() {
    init_logger();

    for kind in StrategyKind::ALL {
        let registry = FactoryRegistry::new();
        let barrier = Barrier::new(THREADS);

        let factories: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|i| {
                    let registry = &registry;
                    let barrier = &barrier;
                    scope.spawn(move || {
                        let config = FactoryConfig::default().with_buffer_resolution(i as u32 + 1);
                        barrier.wait();
                        registry.get_factory(kind, Some(&config))
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().expect("thread panicked").unwrap())
                .collect()
        });

        let first = &factories[0];
        for factory in &factories {
            assert!(Arc::ptr_eq(first, factory));
        }

        // Whichever call won, the other configurations did not change the factory.
        let resolution = first.buffer_resolution();
        let again = registry
            .get_factory(kind, Some(&FactoryConfig::default().with_buffer_resolution(100)))
            .unwrap();
        assert_eq!(again.buffer_resolution(), resolution);
    }
}

#[test]
fn global_registry() {
    init_logger();

    let spherical = spherical_factory(None).unwrap();
    assert!(Arc::ptr_eq(&spherical, &spherical_factory(None).unwrap()));
    assert!(Arc::ptr_eq(
        &spherical,
        &FactoryRegistry::global()
            .get_factory(StrategyKind::Spherical, Some(&FactoryConfig::default()))
            .unwrap()
    ));

    assert_eq!(
        mercator_factory(Some(&FactoryConfig::default().with_buffer_resolution(0))).unwrap_err(),
        GeographyError::InvalidConfig("buffer_resolution must be a positive integer".into())
    );

    let mercator =
        mercator_factory(Some(&FactoryConfig::default().with_buffer_resolution(8))).unwrap();
    assert_eq!(mercator.buffer_resolution(), 8);

    let ignored =
        mercator_factory(Some(&FactoryConfig::default().with_buffer_resolution(2))).unwrap();
    assert!(Arc::ptr_eq(&mercator, &ignored));
    assert_eq!(ignored.buffer_resolution(), 8);

    let buffer = ignored
        .create_point(0.0, 0.0)
        .unwrap()
        .buffer(10.0)
        .unwrap();
    assert_eq!(buffer.exterior().points.len(), 32);
}
