// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discovering hierarchy consumers through a plugin registry.
//!
//! Consumers are registered under a capability at startup, the registry is frozen, and the
//! hierarchy module is driven through an explicit lifecycle.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example plugin_startup`

use std::cell::RefCell;
use std::rc::Rc;

use understory_hierarchy::{Children, FlatCursor, HierarchyConsumer, HierarchyModule};
use understory_plugin::{Capability, Lifecycle, LifecycleGroup, PluginRegistry};

const CONSUMERS: Capability = Capability("hierarchy.consumer");

struct RootLister;

impl HierarchyConsumer for RootLister {
    fn set_hierarchy_data(&mut self, data: Children) {
        let names: Vec<_> = data.iter().map(|node| node.name()).collect();
        println!("  [roots] {names:?}");
    }
}

struct NodeCounter;

impl HierarchyConsumer for NodeCounter {
    fn set_hierarchy_data(&mut self, data: Children) {
        let total: usize = data.iter().map(|node| node.subtree_len()).sum();
        println!("  [count] {total} nodes");
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut registry: PluginRegistry<dyn HierarchyConsumer> = PluginRegistry::new();
    let registered = registry
        .register(CONSUMERS, "root-lister", || -> Box<dyn HierarchyConsumer> {
            Box::new(RootLister)
        })
        .and_then(|()| {
            registry.register(CONSUMERS, "node-counter", || -> Box<dyn HierarchyConsumer> {
                Box::new(NodeCounter)
            })
        });
    if let Err(err) = registered {
        eprintln!("registration failed: {err}");
        return;
    }
    registry.freeze();
    if let Err(err) = registry.register(CONSUMERS, "late", || -> Box<dyn HierarchyConsumer> {
        Box::new(NodeCounter)
    }) {
        println!("after freeze: {err}");
    }

    let mut source = FlatCursor::new();
    source.push(1, "Camera", 0).push(2, "World", 0).push(3, "Ground", 1);
    let module = Rc::new(RefCell::new(HierarchyModule::new(source)));

    println!("== Registering consumers ==");
    for consumer in registry.instantiate(CONSUMERS) {
        module.borrow_mut().add_consumer(consumer);
    }

    let mut app = LifecycleGroup::new();
    app.push(Box::new(Rc::clone(&module)));

    println!("== Start ==");
    app.start();

    println!("== Edit while running ==");
    module.borrow_mut().cursor_mut().push(4, "Sky", 0);
    module.borrow_mut().hierarchy_changed();

    app.stop();
    println!("== Stopped: running={} ==", module.borrow().is_running());
}
