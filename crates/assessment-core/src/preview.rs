//! Lifetime management for photo preview handles.
//!
//! A handle lives exactly as long as the photo value it was made for is on
//! display: replacing or removing the photo releases it, and so does
//! dropping the registry.

use std::collections::HashMap;

use assessment_domain::{FormData, Photo};
use tracing::debug;
use uuid::Uuid;

/// Capability that turns a photo into something displayable.
pub trait PreviewBackend {
    type Handle;

    fn create(&mut self, photo: &Photo) -> Self::Handle;
    fn release(&mut self, handle: Self::Handle);
}

/// Counts of handles touched by one [`PreviewRegistry::sync`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewSync {
    pub created: usize,
    pub released: usize,
}

struct LiveHandle<H> {
    photo_id: Uuid,
    handle: H,
}

/// Tracks one preview handle per instance that currently shows a photo.
pub struct PreviewRegistry<B: PreviewBackend> {
    backend: B,
    live: HashMap<Uuid, LiveHandle<B::Handle>>,
}

impl<B: PreviewBackend> PreviewRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            live: HashMap::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Handle for the photo currently attached to `instance_id`, if any.
    pub fn handle(&self, instance_id: Uuid) -> Option<&B::Handle> {
        self.live.get(&instance_id).map(|live| &live.handle)
    }

    /// Brings the registry in line with the photos present in `form`.
    pub fn sync(&mut self, form: &FormData) -> PreviewSync {
        let mut outcome = PreviewSync::default();
        let mut wanted: HashMap<Uuid, &Photo> = HashMap::new();
        for instance in form.instances() {
            if let Some(photo) = &instance.photo {
                wanted.insert(instance.id, photo);
            }
        }

        let stale: Vec<Uuid> = self
            .live
            .iter()
            .filter(|(instance_id, live)| {
                wanted
                    .get(*instance_id)
                    .map_or(true, |photo| photo.id != live.photo_id)
            })
            .map(|(instance_id, _)| *instance_id)
            .collect();
        for instance_id in stale {
            if let Some(live) = self.live.remove(&instance_id) {
                self.backend.release(live.handle);
                outcome.released += 1;
            }
        }

        for (instance_id, photo) in wanted {
            if self.live.contains_key(&instance_id) {
                continue;
            }
            let handle = self.backend.create(photo);
            self.live.insert(
                instance_id,
                LiveHandle {
                    photo_id: photo.id,
                    handle,
                },
            );
            outcome.created += 1;
        }

        if outcome != PreviewSync::default() {
            debug!(
                created = outcome.created,
                released = outcome.released,
                live = self.live.len(),
                "preview handles synced"
            );
        }
        outcome
    }

    /// Releases every handle.
    pub fn clear(&mut self) -> usize {
        let count = self.live.len();
        for (_, live) in self.live.drain() {
            self.backend.release(live.handle);
        }
        count
    }
}

impl<B: PreviewBackend> Drop for PreviewRegistry<B> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::{FormStore, InstanceCoord};

    #[derive(Default, Clone)]
    struct Counting {
        live: Rc<Cell<i32>>,
    }

    impl PreviewBackend for Counting {
        type Handle = String;

        fn create(&mut self, photo: &Photo) -> String {
            self.live.set(self.live.get() + 1);
            photo.file_name.clone()
        }

        fn release(&mut self, _handle: String) {
            self.live.set(self.live.get() - 1);
        }
    }

    fn photo(name: &str) -> Photo {
        Photo::new(name, "image/png", vec![0u8; 4])
    }

    #[test]
    fn replacing_photo_releases_previous_handle() {
        let backend = Counting::default();
        let live = Rc::clone(&backend.live);
        let mut registry = PreviewRegistry::new(backend);
        let mut store = FormStore::default();
        let coord = InstanceCoord::new(0, 0, 0);
        let id = store.instance(coord).unwrap().id;

        store.set_instance_photo(coord, Some(photo("a.png"))).unwrap();
        assert_eq!(registry.sync(store.form()), PreviewSync { created: 1, released: 0 });
        assert_eq!(registry.handle(id).map(String::as_str), Some("a.png"));

        store.set_instance_photo(coord, Some(photo("b.png"))).unwrap();
        assert_eq!(registry.sync(store.form()), PreviewSync { created: 1, released: 1 });
        assert_eq!(live.get(), 1);

        store.set_instance_photo(coord, None).unwrap();
        registry.sync(store.form());
        assert_eq!(live.get(), 0);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn unchanged_photo_keeps_its_handle() {
        let mut registry = PreviewRegistry::new(Counting::default());
        let mut store = FormStore::default();
        store
            .set_instance_photo(InstanceCoord::new(1, 0, 0), Some(photo("x.png")))
            .unwrap();
        registry.sync(store.form());
        store
            .set_instance_description(InstanceCoord::new(1, 0, 0), "note")
            .unwrap();
        assert_eq!(registry.sync(store.form()), PreviewSync::default());
    }

    #[test]
    fn dropping_registry_releases_all_handles() {
        let backend = Counting::default();
        let live = Rc::clone(&backend.live);
        let mut store = FormStore::default();
        store
            .set_instance_photo(InstanceCoord::new(0, 0, 0), Some(photo("1.png")))
            .unwrap();
        store
            .set_instance_photo(InstanceCoord::new(0, 1, 0), Some(photo("2.png")))
            .unwrap();
        {
            let mut registry = PreviewRegistry::new(backend);
            registry.sync(store.form());
            assert_eq!(live.get(), 2);
        }
        assert_eq!(live.get(), 0);
    }
}
