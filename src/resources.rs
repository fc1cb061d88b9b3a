use crate::error::ResourceCreationError;
use crate::style::{ResourceKind, StyleSpec};
use crate::surface::DrawingSurface;
use std::collections::HashMap;

/// A non-owning reference to a device resource. Valid until the
/// [`ResourceCache`] that handed it out is released.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ResourceHandle {
    pub kind: ResourceKind,
    /// Device-specific slot
    pub id: usize,
}

/// Deduplicates device resources by their [`StyleSpec`] for the lifetime of one
/// document.
///
/// The cache owns every resource it creates. Asking twice for equal specs returns
/// the same handle; [`release_all`](ResourceCache::release_all) disposes of
/// everything once, in creation order.
#[derive(Debug, Default)]
pub struct ResourceCache {
    index: HashMap<StyleSpec, usize>,
    entries: Vec<(StyleSpec, ResourceHandle)>,
    released: bool,
}

impl ResourceCache {
    pub fn new() -> ResourceCache {
        ResourceCache::default()
    }

    /// Return the handle for `spec`, creating the resource on `surface` the first
    /// time it is requested
    pub fn acquire<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        spec: &StyleSpec,
    ) -> Result<ResourceHandle, ResourceCreationError> {
        if self.released {
            return Err(ResourceCreationError::Released);
        }
        if let Some(&i) = self.index.get(spec) {
            return Ok(self.entries[i].1);
        }

        let handle = surface.create_resource(spec)?;
        log::debug!("created {} {:?} for {:?}", handle.kind, handle.id, spec);
        self.index.insert(spec.clone(), self.entries.len());
        self.entries.push((spec.clone(), handle));
        Ok(handle)
    }

    /// Release every cached resource. Calling this again does nothing.
    pub fn release_all<S: DrawingSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.released {
            return;
        }
        self.released = true;
        self.index.clear();
        for (_, handle) in self.entries.drain(..) {
            surface.release_resource(handle);
        }
        log::debug!("released all document resources");
    }

    /// Number of live resources
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::colour::colours;
    use crate::style::{BrushSpec, FontSpec, PenSpec};
    use crate::surface::{DrawCall, RecordingSurface};

    #[test]
    fn equal_specs_share_a_handle() {
        let mut surface = RecordingSurface::new();
        let mut cache = ResourceCache::new();

        let a = cache
            .acquire(&mut surface, &FontSpec::new("Arial", 300).into())
            .expect("can create font");
        let b = cache
            .acquire(&mut surface, &FontSpec::new("Arial", 300).into())
            .expect("can create font");
        let c = cache
            .acquire(&mut surface, &FontSpec::new("Arial", 310).into())
            .expect("can create font");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(cache.len(), 2);
        assert_eq!(surface.created().len(), 2);
    }

    #[test]
    fn kinds_never_collide() {
        let mut surface = RecordingSurface::new();
        let mut cache = ResourceCache::new();
        let pen = cache
            .acquire(
                &mut surface,
                &PenSpec {
                    width: 10,
                    colour: colours::BLACK,
                }
                .into(),
            )
            .expect("can create pen");
        let brush = cache
            .acquire(
                &mut surface,
                &BrushSpec {
                    colour: colours::BLACK,
                }
                .into(),
            )
            .expect("can create brush");
        assert_ne!(pen, brush);
        assert_eq!(pen.kind, ResourceKind::Pen);
        assert_eq!(brush.kind, ResourceKind::Brush);
    }

    #[test]
    fn release_is_idempotent() {
        let mut surface = RecordingSurface::new();
        let mut cache = ResourceCache::new();
        for size in [100, 200, 100, 300] {
            cache
                .acquire(&mut surface, &FontSpec::new("Arial", size).into())
                .expect("can create font");
        }

        cache.release_all(&mut surface);
        cache.release_all(&mut surface);

        let released = surface
            .calls()
            .iter()
            .filter(|call| matches!(call, DrawCall::Release(_)))
            .count();
        assert_eq!(released, 3);
        assert!(cache.is_empty());
        assert_eq!(
            cache.acquire(&mut surface, &FontSpec::new("Arial", 100).into()),
            Err(ResourceCreationError::Released)
        );
    }

    #[test]
    fn creation_failures_are_reported() {
        let mut surface = RecordingSurface::new().reject_font("Missing Sans");
        let mut cache = ResourceCache::new();
        assert_eq!(
            cache.acquire(&mut surface, &FontSpec::new("Missing Sans", 100).into()),
            Err(ResourceCreationError::UnknownFont("Missing Sans".into()))
        );
        assert!(cache.is_empty());
    }
}
