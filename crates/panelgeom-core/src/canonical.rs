use crate::model::SegmentVertices;
use std::mem;

/// Reorder the four corner points of a wing segment into the winding the
/// solver expects: `a`/`d` on the root-side edge, `b`/`c` on the tip-side
/// edge, leading edge before trailing edge.
///
/// Authoring tools may run a segment's span and chord axes in either
/// direction. The solver derives each panel normal from the vertex order, and
/// a segment left in the wrong order flips that normal without any error
/// being raised.
///
/// The four guards are order-sensitive: the first two fix each span-wise edge
/// independently (ties on `y` break on `z`, which carries the ordering for
/// fins), the last two orient the edge pair along the chord. A canonical
/// input fails all four guards, so the function is idempotent.
pub fn canonical_panel_order(mut v: SegmentVertices) -> SegmentVertices {
    if v.b.y < v.a.y || (v.b.y == v.a.y && v.b.z < v.a.z) {
        mem::swap(&mut v.a, &mut v.b);
    }
    if v.c.y < v.d.y || (v.c.y == v.d.y && v.c.z < v.d.z) {
        mem::swap(&mut v.c, &mut v.d);
    }
    if v.d.x < v.a.x {
        mem::swap(&mut v.a, &mut v.d);
    }
    if v.c.x < v.b.x {
        mem::swap(&mut v.b, &mut v.c);
    }
    v
}
