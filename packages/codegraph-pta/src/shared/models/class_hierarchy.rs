//! Class hierarchy index
//!
//! Derived once from the class table: super-class links plus the reverse
//! "direct subtype" relations used by CHA dispatch.

use super::ids::ClassId;
use super::program::ClassInfo;

#[derive(Debug, Clone, Default)]
pub struct ClassHierarchy {
    super_classes: Vec<Option<ClassId>>,
    direct_subclasses: Vec<Vec<ClassId>>,
    direct_subinterfaces: Vec<Vec<ClassId>>,
    direct_implementors: Vec<Vec<ClassId>>,
}

impl ClassHierarchy {
    pub(crate) fn build(classes: &[ClassInfo]) -> Self {
        let n = classes.len();
        let mut hierarchy = Self {
            super_classes: classes.iter().map(|c| c.super_class).collect(),
            direct_subclasses: vec![Vec::new(); n],
            direct_subinterfaces: vec![Vec::new(); n],
            direct_implementors: vec![Vec::new(); n],
        };

        for (i, class) in classes.iter().enumerate() {
            let id = ClassId(i as u32);
            if class.is_interface {
                // interface I extends J, K
                for &sup in &class.interfaces {
                    hierarchy.direct_subinterfaces[sup.0 as usize].push(id);
                }
            } else {
                if let Some(sup) = class.super_class {
                    hierarchy.direct_subclasses[sup.0 as usize].push(id);
                }
                for &iface in &class.interfaces {
                    hierarchy.direct_implementors[iface.0 as usize].push(id);
                }
            }
        }

        hierarchy
    }

    #[inline]
    pub fn super_class_of(&self, class: ClassId) -> Option<ClassId> {
        self.super_classes.get(class.0 as usize).copied().flatten()
    }

    #[inline]
    pub fn direct_subclasses_of(&self, class: ClassId) -> &[ClassId] {
        self.direct_subclasses
            .get(class.0 as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[inline]
    pub fn direct_subinterfaces_of(&self, class: ClassId) -> &[ClassId] {
        self.direct_subinterfaces
            .get(class.0 as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[inline]
    pub fn direct_implementors_of(&self, class: ClassId) -> &[ClassId] {
        self.direct_implementors
            .get(class.0 as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Superclass chain starting at `class` itself
    pub fn super_chain(&self, class: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        std::iter::successors(Some(class), move |&c| self.super_class_of(c))
    }
}
