use crate::coords::{Rect, Vec2};

/// Default fan-out of every tree node.
pub const DEFAULT_NODE_SIZE: usize = 16;

/// Resolution of the Hilbert grid used to order leaves (2^16 cells per axis).
const HILBERT_SIDE: u32 = 1 << 16;

/// Packed Hilbert R-tree.
///
/// Leaves are the padded item boxes sorted along a Hilbert curve; each upper
/// level groups `node_size` consecutive nodes of the level below. All levels
/// live in one flat array, leaves first and the root last.
///
/// Invariant: `boxes.len() == indices.len()` and `level_bounds` holds the
/// exclusive end of every level inside `boxes`, so `level_bounds[0]` is the
/// item count and the last entry is `boxes.len()`.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    node_size: usize,
    num_items: usize,
    /// Node boxes, level by level.
    boxes: Vec<Rect>,
    /// Leaves: original item index. Internal nodes: position of the first child.
    indices: Vec<usize>,
    level_bounds: Vec<usize>,
}

impl SpatialIndex {
    /// Bulk-loads the boxes `[x - padding, y - padding, x + padding, y + padding]`.
    pub fn build(points: &[Vec2], padding: f64) -> Self {
        Self::with_node_size(points, padding, DEFAULT_NODE_SIZE)
    }

    pub fn with_node_size(points: &[Vec2], padding: f64, node_size: usize) -> Self {
        let node_size = node_size.clamp(2, 65_535);
        let num_items = points.len();

        if num_items == 0 {
            return Self {
                node_size,
                num_items,
                boxes: Vec::new(),
                indices: Vec::new(),
                level_bounds: Vec::new(),
            };
        }

        let item_boxes: Vec<Rect> = points.iter().map(|&p| Rect::around(p, padding)).collect();
        let bounds = item_boxes.iter().fold(Rect::empty(), |acc, b| acc.union(*b));

        let mut order: Vec<usize> = (0..num_items).collect();
        let keys: Vec<u64> = item_boxes
            .iter()
            .map(|b| hilbert_key(b.center(), bounds))
            .collect();
        order.sort_unstable_by_key(|&i| keys[i]);

        let mut level_bounds = vec![num_items];
        let mut count = num_items;
        let mut total = num_items;
        loop {
            count = count.div_ceil(node_size);
            total += count;
            level_bounds.push(total);
            if count == 1 {
                break;
            }
        }

        let mut boxes = Vec::with_capacity(total);
        let mut indices = Vec::with_capacity(total);
        for &i in &order {
            boxes.push(item_boxes[i]);
            indices.push(i);
        }

        let mut level_start = 0;
        for level in 0..level_bounds.len() - 1 {
            let level_end = level_bounds[level];
            let mut pos = level_start;
            while pos < level_end {
                let end = (pos + node_size).min(level_end);
                let parent = boxes[pos..end]
                    .iter()
                    .fold(Rect::empty(), |acc, b| acc.union(*b));
                boxes.push(parent);
                indices.push(pos);
                pos = end;
            }
            level_start = level_end;
        }

        debug_assert_eq!(boxes.len(), total);
        log::debug!(
            "spatial index built: {} items, {} levels, node size {}",
            num_items,
            level_bounds.len(),
            node_size
        );

        Self {
            node_size,
            num_items,
            boxes,
            indices,
            level_bounds,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.num_items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_items == 0
    }

    /// Union of every padded item box, or `None` for an empty index.
    pub fn bounds(&self) -> Option<Rect> {
        self.boxes.last().copied()
    }

    /// Indices of every item whose padded box intersects `rect`.
    ///
    /// Order is unspecified. The returned vector is an owned snapshot.
    pub fn query(&self, rect: Rect) -> Vec<usize> {
        let mut out = Vec::new();
        let Some(&root_box) = self.boxes.last() else { return out };
        if !root_box.intersects(rect) {
            return out;
        }

        let top = self.level_bounds.len() - 1;
        let mut stack = vec![(self.boxes.len() - 1, top)];

        while let Some((node, level)) = stack.pop() {
            let child_level = level - 1;
            let first = self.indices[node];
            let end = (first + self.node_size).min(self.level_bounds[child_level]);

            for pos in first..end {
                if !self.boxes[pos].intersects(rect) {
                    continue;
                }
                if child_level == 0 {
                    out.push(self.indices[pos]);
                } else {
                    stack.push((pos, child_level));
                }
            }
        }

        out
    }
}

fn hilbert_key(p: Vec2, bounds: Rect) -> u64 {
    let scale = (HILBERT_SIDE - 1) as f64;
    let norm = |v: f64, min: f64, extent: f64| -> u32 {
        if extent > 0.0 {
            (((v - min) / extent) * scale).clamp(0.0, scale) as u32
        } else {
            0
        }
    };
    let hx = norm(p.x, bounds.min.x, bounds.width());
    let hy = norm(p.y, bounds.min.y, bounds.height());
    hilbert_d(HILBERT_SIDE, hx, hy)
}

/// Distance of `(x, y)` along the Hilbert curve filling an `n × n` grid.
fn hilbert_d(n: u32, mut x: u32, mut y: u32) -> u64 {
    let mut d: u64 = 0;
    let mut s = n / 2;
    while s > 0 {
        let rx = u32::from(x & s > 0);
        let ry = u32::from(y & s > 0);
        d += u64::from(s) * u64::from(s) * u64::from((3 * rx) ^ ry);
        if ry == 0 {
            if rx == 1 {
                x = n - 1 - x;
                y = n - 1 - y;
            }
            std::mem::swap(&mut x, &mut y);
        }
        s /= 2;
    }
    d
}
