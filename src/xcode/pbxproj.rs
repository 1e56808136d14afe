//! The object arena of a project file.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::util::hash::Fingerprint;

use super::object::{
    BuildConfigurationObject, ConfigurationList, FileReference, Group, NativeTarget, ObjectId,
    PbxObject,
};

/// Every object of one project, addressed by id.
///
/// Identifiers derive from the object's `isa` and a caller supplied key, so
/// adding the same objects in the same order always yields the same ids.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PbxProj {
    archive_version: u32,
    object_version: u32,
    classes: BTreeMap<String, String>,
    objects: BTreeMap<ObjectId, PbxObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    root_object: Option<ObjectId>,
}

impl Default for PbxProj {
    fn default() -> Self {
        PbxProj {
            archive_version: 1,
            object_version: 50,
            classes: BTreeMap::new(),
            objects: BTreeMap::new(),
            root_object: None,
        }
    }
}

impl PbxProj {
    pub fn new() -> Self {
        PbxProj::default()
    }

    /// Add an object under an id derived from `key`.
    pub fn add(&mut self, key: &str, object: PbxObject) -> ObjectId {
        let mut attempt = 0u64;
        let id = loop {
            let mut fingerprint = Fingerprint::new();
            fingerprint
                .update_str(object.isa())
                .update_str(key)
                .update_u64(attempt);
            let id = ObjectId::new(fingerprint.finish_object_id());
            if !self.objects.contains_key(&id) {
                break id;
            }
            attempt += 1;
        };
        self.objects.insert(id.clone(), object);
        id
    }

    pub fn get(&self, id: &ObjectId) -> Option<&PbxObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut PbxObject> {
        self.objects.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> impl Iterator<Item = (&ObjectId, &PbxObject)> {
        self.objects.iter()
    }

    pub fn root_object(&self) -> Option<&ObjectId> {
        self.root_object.as_ref()
    }

    pub fn set_root_object(&mut self, id: ObjectId) {
        self.root_object = Some(id);
    }

    /// Append `child` to a group, variant group or version group.
    ///
    /// `group` must be one of those; anything else is a generator bug and
    /// panics in debug builds.
    pub fn add_child(&mut self, group: &ObjectId, child: ObjectId) {
        let children = match self.objects.get_mut(group) {
            Some(PbxObject::Group(g)) | Some(PbxObject::VariantGroup(g)) => &mut g.children,
            Some(PbxObject::VersionGroup(g)) => &mut g.children,
            _ => {
                debug_assert!(false, "{} is not a group", group);
                tracing::warn!("dropping child {} of non-group {}", child, group);
                return;
            }
        };
        children.push(child);
    }

    /// Point a version group at its current version.
    ///
    /// Returns false when `handle` is not a version group.
    pub fn bind_current_version(&mut self, handle: &ObjectId, file: &ObjectId) -> bool {
        match self.objects.get_mut(handle) {
            Some(PbxObject::VersionGroup(group)) => {
                group.current_version = Some(file.clone());
                true
            }
            _ => false,
        }
    }

    pub fn group(&self, id: &ObjectId) -> Option<&Group> {
        match self.objects.get(id) {
            Some(PbxObject::Group(group)) | Some(PbxObject::VariantGroup(group)) => Some(group),
            _ => None,
        }
    }

    pub fn file_reference(&self, id: &ObjectId) -> Option<&FileReference> {
        match self.objects.get(id) {
            Some(PbxObject::FileReference(file)) => Some(file),
            _ => None,
        }
    }

    pub fn native_target(&self, id: &ObjectId) -> Option<&NativeTarget> {
        match self.objects.get(id) {
            Some(PbxObject::NativeTarget(target)) => Some(target),
            _ => None,
        }
    }

    pub fn native_target_mut(&mut self, id: &ObjectId) -> Option<&mut NativeTarget> {
        match self.objects.get_mut(id) {
            Some(PbxObject::NativeTarget(target)) => Some(target),
            _ => None,
        }
    }

    pub fn configuration_list(&self, id: &ObjectId) -> Option<&ConfigurationList> {
        match self.objects.get(id) {
            Some(PbxObject::ConfigurationList(list)) => Some(list),
            _ => None,
        }
    }

    pub fn build_configuration(&self, id: &ObjectId) -> Option<&BuildConfigurationObject> {
        match self.objects.get(id) {
            Some(PbxObject::BuildConfiguration(config)) => Some(config),
            _ => None,
        }
    }

    pub fn build_configuration_mut(&mut self, id: &ObjectId) -> Option<&mut BuildConfigurationObject> {
        match self.objects.get_mut(id) {
            Some(PbxObject::BuildConfiguration(config)) => Some(config),
            _ => None,
        }
    }

    /// Display names of a group's children, in order.
    pub fn child_names(&self, group: &ObjectId) -> Vec<&str> {
        self.objects
            .get(group)
            .and_then(PbxObject::children)
            .map(|children| {
                children
                    .iter()
                    .filter_map(|c| self.objects.get(c).and_then(PbxObject::display_name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of objects with the given `isa`.
    pub fn count(&self, isa: &str) -> usize {
        self.objects.values().filter(|o| o.isa() == isa).count()
    }
}
