use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Handle to an object owned by a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    /// Wrap a host's own object handle
    pub fn new(index: usize) -> Self {
        ObjectId(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// How an empty object is drawn in the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyDisplay {
    #[default]
    PlainAxes,
    Cube,
}

/// The host scene graph the importer writes into
pub trait Scene {
    /// Render frame rate
    fn fps(&self) -> f64;

    fn current_frame(&self) -> f64;

    fn set_current_frame(&mut self, frame: f64);

    /// Link a new empty object. The host may adjust `name` to keep names unique.
    fn add_empty(&mut self, name: &str) -> ObjectId;

    fn set_parent(&mut self, object: ObjectId, parent: Option<ObjectId>);

    fn set_empty_display(&mut self, object: ObjectId, display: EmptyDisplay, size: f64);

    /// Refresh whatever lookup structures the host keeps over its objects
    fn update(&mut self) {}

    /// Set custom property `property` of `object` to `value` at `frame` and key it.
    fn insert_keyframe(&mut self, object: ObjectId, property: &str, frame: f64, value: f64);
}

/// Keys closer than this land on the same frame and replace each other
pub const KEYFRAME_MERGE_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Keyframe {
    pub frame: f64,
    pub value: f64,
}

impl Keyframe {
    pub fn new(frame: f64, value: f64) -> Self {
        Keyframe { frame, value }
    }
}

/// A keyed custom property: its last assigned value and its curve
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Property {
    pub value: f64,
    pub keyframes: Vec<Keyframe>,
}

impl Property {
    /// Insert a key keeping the curve sorted by frame
    pub fn insert(&mut self, key: Keyframe) {
        let idx = self
            .keyframes
            .partition_point(|k| k.frame < key.frame - KEYFRAME_MERGE_THRESHOLD);

        match self.keyframes.get_mut(idx) {
            Some(existing) if (existing.frame - key.frame).abs() < KEYFRAME_MERGE_THRESHOLD => {
                existing.value = key.value;
            }
            _ => self.keyframes.insert(idx, key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneObject {
    pub name: String,
    pub parent: Option<ObjectId>,
    pub empty_display: EmptyDisplay,
    pub empty_display_size: f64,
    pub properties: BTreeMap<String, Property>,
}

/// A self-contained scene graph with a current-frame cursor, used by the
/// command-line importer and the tests.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryScene {
    fps: f64,
    frame_current: f64,
    objects: Vec<SceneObject>,
    #[serde(skip)]
    index: HashMap<String, ObjectId>,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new(24.0, 1.0)
    }
}

impl MemoryScene {
    pub fn new(fps: f64, frame_current: f64) -> Self {
        MemoryScene {
            fps,
            frame_current,
            objects: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    /// Look up an object by name. Only sees objects linked before the last [`Scene::update`].
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.index.get(name).copied()
    }

    pub fn children(&self, parent: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter(move |(_, obj)| obj.parent == Some(parent))
            .map(|(i, _)| ObjectId(i))
    }

    pub fn property(&self, id: ObjectId, name: &str) -> Option<&Property> {
        self.object(id).and_then(|obj| obj.properties.get(name))
    }

    fn unique_name(&self, name: &str) -> String {
        let taken = |candidate: &str| self.objects.iter().any(|obj| obj.name == candidate);
        if !taken(name) {
            return name.to_string();
        }
        (1..)
            .map(|n| format!("{}.{:03}", name, n))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| name.to_string())
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        let found = self.objects.get_mut(id.0);
        if found.is_none() {
            log::warn!("Scene has no object #{}", id.0);
        }
        found
    }
}

impl Scene for MemoryScene {
    fn fps(&self) -> f64 {
        self.fps
    }

    fn current_frame(&self) -> f64 {
        self.frame_current
    }

    fn set_current_frame(&mut self, frame: f64) {
        self.frame_current = frame;
    }

    fn add_empty(&mut self, name: &str) -> ObjectId {
        let name = self.unique_name(name);
        self.objects.push(SceneObject {
            name,
            parent: None,
            empty_display: EmptyDisplay::default(),
            empty_display_size: 1.0,
            properties: BTreeMap::new(),
        });
        ObjectId(self.objects.len() - 1)
    }

    fn set_parent(&mut self, object: ObjectId, parent: Option<ObjectId>) {
        if let Some(obj) = self.object_mut(object) {
            obj.parent = parent;
        }
    }

    fn set_empty_display(&mut self, object: ObjectId, display: EmptyDisplay, size: f64) {
        if let Some(obj) = self.object_mut(object) {
            obj.empty_display = display;
            obj.empty_display_size = size;
        }
    }

    fn update(&mut self) {
        self.index = self
            .objects
            .iter()
            .enumerate()
            .map(|(i, obj)| (obj.name.clone(), ObjectId(i)))
            .collect();
    }

    fn insert_keyframe(&mut self, object: ObjectId, property: &str, frame: f64, value: f64) {
        // Keying works on the cursor, like an interactive host
        self.frame_current = frame;
        if let Some(obj) = self.object_mut(object) {
            let prop = obj.properties.entry(property.to_string()).or_default();
            prop.value = value;
            prop.insert(Keyframe::new(frame, value));
        }
    }
}
