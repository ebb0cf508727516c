//! Minimum-extent measurement of a subtree.
//!
//! [`min_extent`] answers one question: along a given axis, how many cells
//! does this node need at least, given what is available? The placement
//! pass asks it for every `fit_content` child before distributing leftover
//! space.
use crate::direction::{Flow, Size};
use crate::node::Node;

/// Minimum extent of `node` along the main axis of `axis`, under `avail`,
/// padding included.
pub(crate) fn min_extent(node: &Node, avail: Size<u32>, axis: Flow) -> u32 {
    let pad = node.padding.size();
    let inner = Size::new(
        avail.width.saturating_sub(pad.width),
        avail.height.saturating_sub(pad.height),
    );
    let content = if !node.children().is_empty() {
        nodes_extent(node, inner, axis)
    } else if !node.items().is_empty() {
        text_extent(node, inner, axis)
    } else {
        0
    };
    content.saturating_add(axis.relative(pad).main)
}

fn nodes_extent(node: &Node, inner: Size<u32>, axis: Flow) -> u32 {
    let children = node.children().iter();
    if axis == node.direction {
        children
            .map(|child| child_claim(child, inner, axis))
            .fold(0, u32::saturating_add)
    } else {
        children
            .map(|child| min_extent(child, inner, axis))
            .max()
            .unwrap_or(0)
    }
}

fn child_claim(child: &Node, inner: Size<u32>, axis: Flow) -> u32 {
    if child.basis > 0 && !child.fit_content {
        child.basis
    } else {
        min_extent(child, inner, axis)
    }
}

fn text_extent(node: &Node, inner: Size<u32>, axis: Flow) -> u32 {
    let dir = node.direction;
    if node.wrap {
        wrapped_extent(node, inner, axis)
    } else if axis == dir {
        node.items()
            .iter()
            .map(|item| item.measure(dir).main)
            .fold(0, u32::saturating_add)
    } else {
        // Items whose main offset falls past the available extent are never
        // drawn, so they must not weigh in either.
        let cap = dir.relative(inner).main;
        let mut offset = 0;
        let mut widest = 0;
        for item in node.items() {
            if offset >= cap {
                break;
            }
            let measure = item.measure(dir);
            widest = widest.max(measure.cross);
            offset = offset.saturating_add(measure.main);
        }
        widest
    }
}

fn wrapped_extent(node: &Node, inner: Size<u32>, axis: Flow) -> u32 {
    let dir = node.direction;
    let tallest = node
        .items()
        .iter()
        .map(|item| item.measure(dir).cross)
        .max()
        .unwrap_or(0);
    if axis != dir {
        // Lines stack along the asked axis: count them under the available
        // run capacity. Accounting every line at the tallest item keeps the
        // overflowed trailing line in the reported minimum.
        let cap = dir.relative(inner).main;
        return wrap_lines(node, cap).saturating_mul(tallest);
    }
    // The asked axis is the one items run along, so the extent *is* the
    // line capacity: the smallest one whose line count fits across.
    let longest = node
        .items()
        .iter()
        .map(|item| item.measure(dir).main)
        .max()
        .unwrap_or(0);
    let room = dir.relative(inner).cross;
    let mut cap = longest.saturating_add(1);
    loop {
        let lines = wrap_lines(node, cap);
        if lines <= 1 || u64::from(lines) * u64::from(tallest) <= u64::from(room) {
            return cap;
        }
        cap = cap.saturating_add(1);
    }
}

/// Greedy line count for `node`'s items packed into lines of `cap` run
/// extent. An item longer than a whole line is truncated at placement, not
/// split, so it still costs a single line here.
fn wrap_lines(node: &Node, cap: u32) -> u32 {
    let mut lines = 1;
    let mut fill = 0u32;
    for item in node.items() {
        let run = item.measure(node.direction).main;
        if fill > 0 && fill.saturating_add(run) > cap {
            lines += 1;
            fill = 0;
        }
        fill = fill.saturating_add(run);
    }
    lines
}
