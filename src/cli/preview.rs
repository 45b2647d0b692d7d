use assessment_core::PreviewBackend;
use assessment_domain::Photo;
use uuid::Uuid;

/// Terminal stand-in for an image preview: a one-line label per photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLabel {
    pub photo_id: Uuid,
    pub text: String,
}

/// Creates [`PreviewLabel`]s and counts their lifecycle.
#[derive(Debug, Default)]
pub struct LabelPreviewBackend {
    created: usize,
    released: usize,
}

impl LabelPreviewBackend {
    pub fn created(&self) -> usize {
        self.created
    }

    pub fn released(&self) -> usize {
        self.released
    }
}

impl PreviewBackend for LabelPreviewBackend {
    type Handle = PreviewLabel;

    fn create(&mut self, photo: &Photo) -> PreviewLabel {
        self.created += 1;
        PreviewLabel {
            photo_id: photo.id,
            text: format!("[photo {} {}]", photo.file_name, human_size(photo.len())),
        }
    }

    fn release(&mut self, _handle: PreviewLabel) {
        self.released += 1;
    }
}

fn human_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let value = bytes as f64;
    if value < KB {
        format!("{bytes} B")
    } else if value < KB * KB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{:.1} MB", value / (KB * KB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assessment_core::{FormStore, PreviewRegistry};

    #[test]
    fn replacing_a_photo_releases_the_old_label() {
        let mut store = FormStore::default();
        let coord = store.resolve_item("2.1").unwrap().instance(0);
        let mut registry = PreviewRegistry::new(LabelPreviewBackend::default());

        store
            .set_instance_photo(coord, Some(Photo::new("a.jpg", "image/jpeg", vec![0; 2048])))
            .unwrap();
        registry.sync(store.form());
        let id = store.instance(coord).unwrap().id;
        assert_eq!(registry.handle(id).unwrap().text, "[photo a.jpg 2.0 KB]");

        store
            .set_instance_photo(coord, Some(Photo::new("b.png", "image/png", vec![1; 10])))
            .unwrap();
        registry.sync(store.form());
        assert_eq!(registry.handle(id).unwrap().text, "[photo b.png 10 B]");
        assert_eq!(registry.backend().created(), 2);
        assert_eq!(registry.backend().released(), 1);
    }
}
