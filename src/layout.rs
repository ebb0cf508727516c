//! The `termflex` placement algorithm and the layout lifecycle.
use log::trace;

use crate::direction::{Flow, Oriented, Size};
use crate::node::{clamp_len, Node, TextItem};
use crate::rect::Rect;
use crate::sizing::min_extent;
use crate::surface::Surface;

/// A node tree bound to the [`Surface`] it draws on.
///
/// The layout owns the root; the root transitively owns every node and text
/// item. Drawing walks the placed tree and emits clipped calls on the
/// surface, depth first, siblings in insertion order, a node's color fill
/// before any of its descendants' output.
pub struct Layout<S: Surface> {
    root: Node,
    surface: S,
}

impl<S: Surface> Layout<S> {
    /// A layout with an empty root drawing on `surface`.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self { root: Node::default(), surface }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }
    /// The root node, for tree building.
    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }
    /// The surface handed to [`Layout::new`].
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
    /// The surface handed to [`Layout::new`].
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
    /// Release the layout, handing the surface back.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Remove all tree content, retaining the root and its style.
    pub fn clear(&mut self) {
        self.root.clear_children();
    }

    /// Place the tree into `rect` and emit draw calls on the surface.
    ///
    /// Runs to completion synchronously; the engine allocates nothing here,
    /// all allocation happens while mutating the tree.
    ///
    /// # Errors
    /// The first refusal from a surface callback aborts emission and is
    /// returned as is. Everything emitted before it stays on the surface.
    pub fn draw(&mut self, rect: Rect) -> Result<(), S::Error> {
        trace!("drawing layout into {rect}");
        place(&self.root, rect, &mut self.surface)
    }
}

/// A child's claim on its parent's main axis, classified once per
/// placement pass.
enum Claim {
    /// `basis` cells, no questions asked.
    Fixed(u32),
    /// The measured minimum.
    Fit(u32),
    /// A weighted share of the leftover.
    Flex(u32),
    /// The measured minimum or the weighted share, whichever is larger.
    FitFlex(u32, u32),
}

fn classify(child: &Node, avail: Size<u32>, flow: Flow) -> Claim {
    if child.basis > 0 && !child.fit_content {
        // basis beats expand when both are set
        Claim::Fixed(child.basis)
    } else if child.fit_content {
        let min = min_extent(child, avail, flow);
        match child.expand {
            0 => Claim::Fit(min),
            weight => Claim::FitFlex(min, weight),
        }
    } else {
        Claim::Flex(child.expand.max(1))
    }
}

fn place<S: Surface>(node: &Node, rect: Rect, surface: &mut S) -> Result<(), S::Error> {
    if rect.is_empty() {
        return Ok(());
    }
    if node.color != 0 {
        surface.draw_color(rect.col, rect.row, rect.width, rect.height, node.color)?;
    }
    let inner = rect.inset(node.padding);
    if inner.is_empty() {
        return Ok(());
    }
    if !node.children().is_empty() {
        place_nodes(node, inner, surface)
    } else if node.items().is_empty() {
        Ok(())
    } else if node.wrap {
        place_wrapped_text(node, inner, surface)
    } else {
        place_text(node, inner, surface)
    }
}

fn place_nodes<S: Surface>(node: &Node, inner: Rect, surface: &mut S) -> Result<(), S::Error> {
    let flow = node.direction;
    let avail = inner.size();
    let main_avail = flow.relative(avail).main;

    let (mut rigid, mut weights) = (0u32, 0u32);
    for child in node.children() {
        match classify(child, avail, flow) {
            Claim::Fixed(extent) | Claim::Fit(extent) => rigid = rigid.saturating_add(extent),
            Claim::Flex(weight) | Claim::FitFlex(_, weight) => {
                weights = weights.saturating_add(weight);
            }
        }
    }
    let leftover = main_avail.saturating_sub(rigid);
    trace!("{flow:?} container: rigid {rigid}, leftover {leftover} over weight {weights}");

    // Integer division leaves `spare` cells; they go to the earliest
    // flexible children so the parts sum to the leftover exactly.
    let mut spare = leftover;
    for child in node.children() {
        if let Claim::Flex(weight) | Claim::FitFlex(_, weight) = classify(child, avail, flow) {
            spare = spare.saturating_sub(portion(leftover, weight, weights));
        }
    }

    let mut offset = 0u32;
    for child in node.children() {
        let extent = match classify(child, avail, flow) {
            Claim::Fixed(extent) | Claim::Fit(extent) => extent,
            Claim::Flex(weight) => take_share(leftover, weight, weights, &mut spare),
            Claim::FitFlex(min, weight) => {
                min.max(take_share(leftover, weight, weights, &mut spare))
            }
        };
        // Zero-extent children are hidden: no recursion, no callbacks.
        if extent == 0 {
            continue;
        }
        if offset >= main_avail {
            break;
        }
        place(child, inner.carve(flow, offset, extent), surface)?;
        offset = offset.saturating_add(extent);
    }
    Ok(())
}

fn portion(leftover: u32, weight: u32, weights: u32) -> u32 {
    if weights == 0 {
        return 0;
    }
    let exact = u64::from(leftover) * u64::from(weight) / u64::from(weights);
    u32::try_from(exact).unwrap_or(u32::MAX)
}

fn take_share(leftover: u32, weight: u32, weights: u32, spare: &mut u32) -> u32 {
    let base = portion(leftover, weight, weights);
    if *spare > 0 {
        *spare -= 1;
        base + 1
    } else {
        base
    }
}

fn place_text<S: Surface>(node: &Node, inner: Rect, surface: &mut S) -> Result<(), S::Error> {
    let flow = node.direction;
    let avail = flow.relative(inner.size());
    let mut offset = 0u32;
    for item in node.items() {
        if offset >= avail.main {
            break;
        }
        let measure = item.measure(flow);
        let main_vis = measure.main.min(avail.main - offset);
        let shift = flow.absolute(Oriented::new(offset, 0));
        let origin = (inner.col + shift.width, inner.row + shift.height);
        // An unwrapped item's slot spans the node's full cross extent.
        paint_item(node, item, surface, flow, origin, main_vis, avail.cross)?;
        offset = offset.saturating_add(measure.main);
    }
    Ok(())
}

fn place_wrapped_text<S: Surface>(
    node: &Node,
    inner: Rect,
    surface: &mut S,
) -> Result<(), S::Error> {
    let flow = node.direction;
    let avail = flow.relative(inner.size());
    let cap = avail.main;
    let mut fill = 0u32;
    let mut stack = 0u32;
    let mut thick = 0u32;
    for item in node.items() {
        let measure = item.measure(flow);
        if fill > 0 && fill.saturating_add(measure.main) > cap {
            stack = stack.saturating_add(thick);
            thick = 0;
            fill = 0;
            // The next line would start past the boundary: emission ends
            // here even though items remain.
            if stack >= avail.cross {
                break;
            }
        }
        let main_vis = measure.main.min(cap.saturating_sub(fill));
        let cross_vis = measure.cross.min(avail.cross - stack);
        let shift = flow.absolute(Oriented::new(fill, stack));
        let origin = (inner.col + shift.width, inner.row + shift.height);
        paint_item(node, item, surface, flow, origin, main_vis, cross_vis)?;
        thick = thick.max(cross_vis);
        fill = fill.saturating_add(measure.main);
    }
    Ok(())
}

/// Emit one item's color fill and text, clipped to `main_vis`×`cross_vis`
/// in the frame of `flow`.
fn paint_item<S: Surface>(
    node: &Node,
    item: &TextItem,
    surface: &mut S,
    flow: Flow,
    (col, row): (u32, u32),
    main_vis: u32,
    cross_vis: u32,
) -> Result<(), S::Error> {
    let color = if item.color != 0 { item.color } else { node.color };
    let attr = if item.attr != 0 { item.attr } else { node.attr };
    if color != 0 && main_vis > 0 && cross_vis > 0 {
        let size = flow.absolute(Oriented::new(main_vis, cross_vis));
        surface.draw_color(col, row, size.width, size.height, color)?;
    }
    match flow {
        Flow::Rows => {
            let text = clip_run(item.bytes(), cross_vis);
            if !text.is_empty() && main_vis > 0 {
                surface.draw_text(text, col, row, color, attr)?;
            }
        }
        Flow::Cols => {
            for (line, segment) in item.segments().enumerate() {
                if clamp_len(line) >= cross_vis {
                    break;
                }
                let text = clip_run(segment, main_vis);
                if !text.is_empty() {
                    surface.draw_text(text, col, row + clamp_len(line), color, attr)?;
                }
            }
        }
    }
    Ok(())
}

fn clip_run(text: &[u8], room: u32) -> &[u8] {
    let room = usize::try_from(room).unwrap_or(usize::MAX);
    &text[..text.len().min(room)]
}
