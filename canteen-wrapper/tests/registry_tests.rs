//! Proxy registry: identity caching, log continuity, shared limit

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use canteen_core::{CanteenConfig, DigestFacade, StackLimit, StackMode};
use canteen_wrapper::{Context2d, MockSurface, ProxyRegistry, SharedSurface};

fn canvas() -> SharedSurface<MockSurface> {
    Rc::new(RefCell::new(MockSurface::new()))
}

#[test]
fn wrapping_twice_shares_one_log() {
    let mut registry = ProxyRegistry::new(StackLimit::new(100));
    let surface = canvas();

    let proxy = registry.wrap(&surface);
    proxy.borrow_mut().begin_path().unwrap();
    registry.wrap(&surface).borrow_mut().fill().unwrap();

    assert_eq!(
        proxy.borrow().serialize(StackMode::Loose),
        r#"["beginPath","fill"]"#
    );
    // Forwarded calls land on the caller's own surface handle
    assert_eq!(surface.borrow().calls().len(), 2);
}

#[test]
fn registry_limit_is_shared_and_live() {
    let limit = StackLimit::new(100);
    let mut registry = ProxyRegistry::new(limit.clone());
    let a = canvas();
    let b = canvas();
    let pa = registry.wrap(&a);
    let pb = registry.wrap(&b);

    {
        let _guard = registry.limit().scoped(1);
        pa.borrow_mut().save().unwrap();
        pa.borrow_mut().restore().unwrap();
        pb.borrow_mut().stroke().unwrap();
        pb.borrow_mut().fill().unwrap();
        assert_eq!(pa.borrow().serialize(StackMode::Loose), r#"["restore"]"#);
        assert_eq!(pb.borrow().serialize(StackMode::Loose), r#"["fill"]"#);
    }

    assert_eq!(limit.get(), 100);
    assert!(pa.borrow().recorder().limit().ptr_eq(&limit));
}

/// Wraps, draws and lets the proxy handle go
fn draw_and_release(
    registry: &mut ProxyRegistry<MockSurface>,
    surface: &SharedSurface<MockSurface>,
) {
    let proxy = registry.wrap(surface);
    proxy.borrow_mut().begin_path().unwrap();
    proxy.borrow_mut().fill().unwrap();
}

#[test]
fn log_survives_dropped_proxy_handle() {
    let mut registry = ProxyRegistry::new(StackLimit::new(100));
    let surface = canvas();

    draw_and_release(&mut registry, &surface);
    assert_eq!(surface.borrow().calls().len(), 2);

    let proxy = registry.wrap(&surface);
    assert_eq!(
        proxy.borrow().serialize(StackMode::Loose),
        r#"["beginPath","fill"]"#
    );

    let stats = registry.stats();
    assert_eq!(stats.created, 1);
    assert_eq!(stats.reused, 1);
    assert_eq!(stats.pruned, 0);
}

#[test]
fn released_surface_entry_is_pruned() {
    let mut registry = ProxyRegistry::new(StackLimit::new(100));
    let surface = canvas();
    let other = canvas();

    draw_and_release(&mut registry, &surface);
    let weak = Rc::downgrade(&surface);
    drop(surface);
    // The registry's proxy still owns the surface until the sweep
    assert!(weak.upgrade().is_some());

    registry.wrap(&other);
    assert!(weak.upgrade().is_none());

    let stats = registry.stats();
    assert_eq!(stats.pruned, 1);
    assert_eq!(stats.live, 1);
}

#[test]
fn config_precision_applies_to_every_proxy() {
    let config = CanteenConfig::from_json(r#"{"stack_size": 50, "number_precision": 10}"#).unwrap();
    let mut registry = ProxyRegistry::from_config(&config).unwrap();
    let surface = canvas();

    let proxy = registry.wrap(&surface);
    proxy.borrow_mut().line_to(1.26, 3.04).unwrap();
    assert_eq!(
        proxy.borrow().serialize(StackMode::Strict),
        r#"[{"method":"lineTo","arguments":[1.3,3]}]"#
    );
    assert_eq!(registry.limit().get(), 50);
}

#[test]
fn custom_digest_is_used() {
    let mut registry = ProxyRegistry::new(StackLimit::new(10))
        .with_digest(DigestFacade::new(|s: &str| format!("len:{}", s.len())));
    let surface = canvas();

    let proxy = registry.wrap(&surface);
    assert_eq!(proxy.borrow().hash(StackMode::Loose), "len:2");

    proxy.borrow_mut().set("fillStyle", json!("red")).unwrap();
    assert_eq!(proxy.borrow().hash(StackMode::Loose), "len:13");
}
