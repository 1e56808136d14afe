//! First level groups of a generated project.

use crate::core::project::Project;
use crate::util::fs::path_string;
use crate::xcode::{Group, ObjectId, PbxObject, PbxProj};

/// The main group and the fixed groups hanging off it.
///
/// Project files go straight into `main`; the `Playgrounds`, `Frameworks`
/// and `Products` groups are appended after them by
/// [`ProjectGroups::attach_first_level`].
#[derive(Debug, Clone)]
pub struct ProjectGroups {
    pub main: ObjectId,
    pub frameworks: ObjectId,
    pub products: ObjectId,
    playgrounds: Option<ObjectId>,
    key: String,
}

impl ProjectGroups {
    pub fn generate(proj: &mut PbxProj, project: &Project) -> Self {
        let key = path_string(&project.path);
        let main = proj.add(&format!("main:{}", key), PbxObject::Group(Group::new(None, None)));
        let frameworks = proj.add(
            &format!("frameworks:{}", key),
            PbxObject::Group(Group::new(Some("Frameworks".to_string()), None)),
        );
        let products = proj.add(
            &format!("products:{}", key),
            PbxObject::Group(Group::new(Some("Products".to_string()), None)),
        );

        ProjectGroups {
            main,
            frameworks,
            products,
            playgrounds: None,
            key,
        }
    }

    /// The `Playgrounds` group, created on first use.
    pub fn playgrounds(&mut self, proj: &mut PbxProj) -> ObjectId {
        if let Some(id) = &self.playgrounds {
            return id.clone();
        }
        let id = proj.add(
            &format!("playgrounds:{}", self.key),
            PbxObject::Group(Group::new(None, Some("Playgrounds".to_string()))),
        );
        self.playgrounds = Some(id.clone());
        id
    }

    pub fn has_playgrounds(&self) -> bool {
        self.playgrounds.is_some()
    }

    /// Append the fixed groups to the main group, after the project files.
    pub fn attach_first_level(&self, proj: &mut PbxProj) {
        if let Some(playgrounds) = &self.playgrounds {
            proj.add_child(&self.main, playgrounds.clone());
        }
        proj.add_child(&self.main, self.frameworks.clone());
        proj.add_child(&self.main, self.products.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::project;

    #[test]
    fn test_first_level_order() {
        let mut proj = PbxProj::new();
        let mut groups = ProjectGroups::generate(&mut proj, &project("/p", "App"));
        let sources = proj.add("s", PbxObject::Group(Group::new(None, Some("Sources".to_string()))));
        proj.add_child(&groups.main, sources);
        groups.playgrounds(&mut proj);
        groups.attach_first_level(&mut proj);

        assert_eq!(
            proj.child_names(&groups.main),
            vec!["Sources", "Playgrounds", "Frameworks", "Products"]
        );
    }

    #[test]
    fn test_playgrounds_group_is_lazy() {
        let mut proj = PbxProj::new();
        let mut groups = ProjectGroups::generate(&mut proj, &project("/p", "App"));
        assert!(!groups.has_playgrounds());
        let first = groups.playgrounds(&mut proj);
        let second = groups.playgrounds(&mut proj);
        assert_eq!(first, second);

        groups.attach_first_level(&mut proj);
        assert_eq!(proj.child_names(&groups.main), vec!["Playgrounds", "Frameworks", "Products"]);
    }
}
