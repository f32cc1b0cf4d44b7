use crate::scene::{EmptyDisplay, ObjectId, Scene};

/// Marker shape for the objects carrying note properties
pub const MARKER_DISPLAY: EmptyDisplay = EmptyDisplay::Cube;
pub const MARKER_SIZE: f64 = 1.0;

/// Create an empty marker object in `scene`, optionally parented
pub fn make_empty<S: Scene + ?Sized>(
    scene: &mut S,
    name: &str,
    parent: Option<ObjectId>,
) -> ObjectId {
    let object = scene.add_empty(name);
    scene.update();
    scene.set_empty_display(object, MARKER_DISPLAY, MARKER_SIZE);
    scene.set_parent(object, parent);
    object
}
