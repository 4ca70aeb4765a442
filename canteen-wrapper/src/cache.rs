//! Proxy cache keyed by surface identity
//!
//! Asking the registry for the same shared surface always yields the same
//! proxy, so its log carries on across repeated access even when every
//! caller handle to the proxy was dropped in between. An entry is swept on
//! the next [`ProxyRegistry::wrap`] or [`ProxyRegistry::prune`] once nobody
//! but the registry holds the proxy and nobody but the proxy holds the
//! surface. All proxies created by one registry share its [`StackLimit`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use canteen_core::{CanteenConfig, DigestFacade, Normalizer, Recorder, StackLimit};

use crate::surface::DrawingSurface;
use crate::SurfaceProxy;

/// A surface shared between application code and its proxy
pub type SharedSurface<T> = Rc<RefCell<T>>;

/// A proxy handed out by a [`ProxyRegistry`]
pub type SharedProxy<T> = Rc<RefCell<SurfaceProxy<SharedSurface<T>>>>;

/// Registry statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Entries currently held
    pub live: usize,

    /// Proxies created
    pub created: u64,

    /// Lookups answered with an existing proxy
    pub reused: u64,

    /// Entries swept after their surface was released
    pub pruned: u64,
}

/// Hands out one proxy per live surface
pub struct ProxyRegistry<T: DrawingSurface> {
    limit: StackLimit,
    normalizer: Normalizer,
    digest: DigestFacade,

    /// Proxies by surface address
    entries: HashMap<usize, SharedProxy<T>>,

    created: u64,
    reused: u64,
    pruned: u64,
}

impl<T: DrawingSurface> ProxyRegistry<T> {
    /// Create a registry whose proxies share `limit`
    pub fn new(limit: StackLimit) -> Self {
        Self {
            limit,
            normalizer: Normalizer::default(),
            digest: DigestFacade::default(),
            entries: HashMap::new(),
            created: 0,
            reused: 0,
            pruned: 0,
        }
    }

    /// Create a registry with limit and precision from `config`
    pub fn from_config(config: &CanteenConfig) -> canteen_core::Result<Self> {
        let mut registry = Self::new(config.stack_limit());
        registry.normalizer = Normalizer::new(config.number_precision)?;
        Ok(registry)
    }

    /// Use `digest` for proxies created from now on
    pub fn with_digest(mut self, digest: DigestFacade) -> Self {
        self.digest = digest;
        self
    }

    fn key(surface: &SharedSurface<T>) -> usize {
        Rc::as_ptr(surface) as *const () as usize
    }

    /// The proxy for `surface`, creating it on first use
    pub fn wrap(&mut self, surface: &SharedSurface<T>) -> SharedProxy<T> {
        self.prune();

        let key = Self::key(surface);
        if let Some(proxy) = self.entries.get(&key) {
            // The proxy keeps its surface alive, so the address cannot have been reused
            debug_assert!(Rc::ptr_eq(proxy.borrow().surface(), surface));
            self.reused += 1;
            tracing::debug!(proxy = %proxy.borrow().id(), "reusing surface proxy");
            return Rc::clone(proxy);
        }

        let recorder = Recorder::new(self.limit.clone())
            .with_normalizer(self.normalizer)
            .with_digest_facade(self.digest.clone());
        let proxy = Rc::new(RefCell::new(SurfaceProxy::with_recorder(
            Rc::clone(surface),
            T::descriptor(),
            recorder,
        )));

        self.entries.insert(key, Rc::clone(&proxy));
        self.created += 1;
        proxy
    }

    /// The existing proxy for `surface`, if there is one
    pub fn get(&self, surface: &SharedSurface<T>) -> Option<SharedProxy<T>> {
        self.entries.get(&Self::key(surface)).cloned()
    }

    /// Sweep entries whose surface was released; returns how many went
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, proxy| !Self::is_released(proxy));
        let removed = before - self.entries.len();

        if removed > 0 {
            self.pruned += removed as u64;
            tracing::debug!(removed, "pruned proxies of released surfaces");
        }
        removed
    }

    /// Only the registry holds the proxy and only the proxy holds the surface
    fn is_released(proxy: &SharedProxy<T>) -> bool {
        if Rc::strong_count(proxy) > 1 {
            return false;
        }
        // A proxy borrowed right now is in use
        match proxy.try_borrow() {
            Ok(proxy) => Rc::strong_count(proxy.surface()) == 1,
            Err(_) => false,
        }
    }

    /// Number of proxies held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The limit shared by every proxy of this registry
    pub fn limit(&self) -> &StackLimit {
        &self.limit
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            live: self.len(),
            created: self.created,
            reused: self.reused,
            pruned: self.pruned,
        }
    }
}

impl<T: DrawingSurface> Default for ProxyRegistry<T> {
    fn default() -> Self {
        Self::new(StackLimit::global())
    }
}
