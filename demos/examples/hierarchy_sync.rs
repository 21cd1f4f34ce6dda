// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping a snapshot in sync with an external hierarchy.
//!
//! Edits the source a few times and shows which edits reach consumers and which subtrees
//! are shared with the previous snapshot.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example hierarchy_sync`

use std::cell::RefCell;
use std::rc::Rc;

use understory_hierarchy::{
    Children, FlatCursor, FlatEntry, HierarchyConsumer, HierarchyModule, NodeId, TreeNode,
};
use understory_plugin::Lifecycle;

#[derive(Default)]
struct Outline {
    pushes: usize,
    last: Children,
}

impl HierarchyConsumer for Outline {
    fn set_hierarchy_data(&mut self, data: Children) {
        self.pushes += 1;
        self.last = data;
    }
}

fn print_tree(nodes: &[TreeNode], depth: usize) {
    for node in nodes {
        println!("  {:indent$}{} ({})", "", node.name(), node.id().0, indent = depth * 2);
        print_tree(node.children(), depth + 1);
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut source = FlatCursor::new();
    source
        .push(1, "Main Camera", 0)
        .push(9, "Lens", 1)
        .push(2, "World", 0)
        .push(3, "Ground", 1)
        .push(4, "Props", 1)
        .push(5, "Crate", 2)
        .push(6, "Editor Rig", 0)
        .push(7, "Rig Internals", 1);

    // The editor's own rig is shown, its internals are not.
    let mut module = HierarchyModule::new(source).with_hidden(NodeId(6));
    let outline = Rc::new(RefCell::new(Outline::default()));
    module.add_consumer(Rc::clone(&outline));

    module.start();
    println!("== Initial ==");
    print_tree(&outline.borrow().last, 0);
    let before = outline.borrow().last.clone();

    println!("== No edit ==");
    let changed = module.hierarchy_changed();
    println!("  changed={changed} pushes={}", outline.borrow().pushes);

    println!("== Rename Crate -> Barrel ==");
    module.cursor_mut().rename(NodeId(5), "Barrel");
    module.hierarchy_changed();
    let after = outline.borrow().last.clone();
    print_tree(&after, 0);
    println!(
        "  camera subtree shared: {}  world subtree shared: {}",
        after[0].children().ptr_eq(before[0].children()),
        after[1].children().ptr_eq(before[1].children()),
    );

    println!("== Insert a root at the front ==");
    module.cursor_mut().entries_mut().insert(
        0,
        FlatEntry {
            id: NodeId(8),
            name: "Sun".into(),
            depth: 0,
        },
    );
    module.hierarchy_changed();
    print_tree(&outline.borrow().last, 0);

    module.stop();
    module.cursor_mut().rename(NodeId(8), "Moon");
    let ignored = !module.hierarchy_changed();
    println!("== Stopped: edit ignored={ignored} pushes={} ==", outline.borrow().pushes);
}
