// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtualized list view over a generated hierarchy.
//!
//! Rows are printed as they would be drawn. Shows the render window following the scroll
//! offset, expand/collapse, and select-to-reveal.
//!
//! Run:
//! - `cargo run -p understory_demos --example list_view_scroll`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use tracing::info;
use understory_hierarchy::{FlatCursor, HierarchyModule, NodeId};
use understory_list_view::{HierarchyListView, ListViewConfig, RowFlags, RowWidget};

const CONFIG: &str = r#"
row_extent = 1.0
view_extent = 5.0
width = 40.0
indent = 2.0
"#;

#[derive(Default)]
struct ConsoleRow {
    depth: usize,
    flags: RowFlags,
    position: Point,
}

impl RowWidget for ConsoleRow {
    fn bind(&mut self, _id: NodeId) {}

    fn unbind(&mut self) {
        self.flags = RowFlags::empty();
    }

    fn set_visual_state(&mut self, _width: f64, depth: usize, flags: RowFlags) {
        self.depth = depth;
        self.flags = flags;
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

type View = HierarchyListView<fn() -> ConsoleRow>;

fn print_rows(title: &str, view: &View) {
    println!("== {title} (scroll={:.1}) ==", view.scroll_offset());
    let mut rows: Vec<_> = view.pool().rows().collect();
    rows.sort_by(|a, b| a.1.position.y.total_cmp(&b.1.position.y));
    for (id, row) in rows {
        let arrow = match (
            row.flags.contains(RowFlags::HAS_CHILDREN),
            row.flags.contains(RowFlags::EXPANDED),
        ) {
            (false, _) => ' ',
            (true, false) => '+',
            (true, true) => '-',
        };
        let mark = if row.flags.contains(RowFlags::SELECTED) { '*' } else { ' ' };
        println!(
            "  y={:>4.1} {mark}{:indent$}{arrow} node {}",
            row.position.y,
            "",
            id.0,
            indent = row.depth * 2,
        );
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    // Five folders of eight files each.
    let mut source = FlatCursor::new();
    for folder in 0..5 {
        let folder_id = folder * 100;
        source.push(folder_id, "folder", 0);
        for file in 1..=8 {
            source.push(folder_id + file, "file", 1);
        }
    }
    let mut module = HierarchyModule::new(source);

    let config = match ListViewConfig::from_toml_str(CONFIG) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("bad config: {err}");
            return;
        }
    };
    let view: View = HierarchyListView::new(config, ConsoleRow::default as fn() -> ConsoleRow);
    let view = Rc::new(RefCell::new(view));
    module.add_consumer(Rc::clone(&view));
    module.refresh();

    let mut view = view.borrow_mut();
    view.set_on_select(|id| info!(node = id.0, "selection changed"));

    view.render();
    print_rows("Collapsed", &view);

    view.on_arrow_clicked(NodeId(100));
    view.render();
    print_rows("Folder 100 expanded", &view);

    view.scroll_by(-3.0);
    view.render();
    print_rows("Scrolled three rows", &view);

    view.select_row(NodeId(305));
    view.render();
    print_rows("Selected node 305", &view);

    view.on_arrow_clicked(NodeId(100));
    view.render();
    print_rows("Folder 100 collapsed", &view);

    println!(
        "rows created: {}  pooled: {}  bound: {}",
        view.pool().created(),
        view.pool().free_len(),
        view.pool().active_len(),
    );
}
