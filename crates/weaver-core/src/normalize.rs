use crate::{NormalizedNode, RawNode};

/// Largest extent of the normalized dataset, in world units.
pub const TARGET_SPAN: f64 = 10.0;

/// Axis-aligned bounding box of raw positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Bounds {
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a [f64; 3]>) -> Option<Self> {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        let mut any = false;
        for p in points {
            any = true;
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        any.then_some(Self { min, max })
    }

    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }

    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn max_extent(&self) -> f64 {
        let s = self.size();
        s[0].max(s[1]).max(s[2])
    }

    /// Uniform factor mapping the largest extent onto [`TARGET_SPAN`].
    ///
    /// Coincident points have no extent to scale; they are only centered.
    pub fn scale_factor(&self) -> f64 {
        let extent = self.max_extent();
        if extent.is_finite() && extent > 0.0 {
            TARGET_SPAN / extent
        } else {
            tracing::debug!(extent, "degenerate bounding box, skipping scale");
            1.0
        }
    }
}

/// Centers the dataset on the origin and scales it uniformly so its largest
/// bounding-box dimension spans [`TARGET_SPAN`] units. Order is preserved.
pub fn normalize(raw: &[RawNode]) -> Vec<NormalizedNode> {
    let Some(bounds) = Bounds::from_points(raw.iter().map(|n| &n.position)) else {
        return Vec::new();
    };
    let center = bounds.center();
    let scale = bounds.scale_factor();

    raw.iter()
        .map(|node| {
            let p = node.position;
            NormalizedNode {
                id: node.id.clone(),
                position: [
                    ((p[0] - center[0]) * scale) as f32,
                    ((p[1] - center[1]) * scale) as f32,
                    ((p[2] - center[2]) * scale) as f32,
                ],
                label: node.label.clone(),
                summary: node.summary.clone(),
                neighbors: node.neighbors.clone(),
            }
        })
        .collect()
}
