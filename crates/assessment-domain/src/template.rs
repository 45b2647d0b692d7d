//! Static checklist definition used to build every new form.

/// Template entry for one checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTemplate {
    pub id: &'static str,
    pub text: &'static str,
    pub is_repeatable: bool,
}

/// Template entry for one section and its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTemplate {
    pub title: &'static str,
    pub items: &'static [ItemTemplate],
}

const fn repeatable(id: &'static str, text: &'static str) -> ItemTemplate {
    ItemTemplate {
        id,
        text,
        is_repeatable: true,
    }
}

/// RDF plant area assessment checklist.
pub const CHECKLIST: &[SectionTemplate] = &[
    SectionTemplate {
        title: "1. Housekeeping & Cleanliness",
        items: &[
            repeatable("1.1", "Dinding & Ventilasi"),
            repeatable("1.2", "Jendela"),
            repeatable("1.3", "Pintu"),
            repeatable("1.4", "Lantai & Tangga"),
            repeatable("1.5", "Jalur Pejalan Kaki"),
            repeatable("1.6", "Area Umum & Fasilitas"),
            repeatable("1.7", "Kebersihan Alat Berat"),
            repeatable("1.8", "Pengendalian Debu"),
        ],
    },
    SectionTemplate {
        title: "2. Occupational Health & Safety",
        items: &[
            repeatable("2.1", "Penggunaan APD"),
            repeatable("2.2", "Rambu & Marka Keselamatan"),
            repeatable("2.3", "Titik Kumpul"),
            repeatable("2.4", "P3K & Fasilitas Medis"),
            repeatable("2.5", "Manajemen Kebisingan"),
            repeatable("2.6", "Manajemen Lalu Lintas Kendaraan Berat"),
        ],
    },
    SectionTemplate {
        title: "3. Material & Product Management",
        items: &[
            repeatable("3.1", "Area Sampah Masuk/MSW"),
            repeatable("3.2", "Fasilitas Pengumpanan"),
            repeatable("3.3", "Proses RDF"),
            repeatable("3.4", "Produk RDF"),
            repeatable("3.5", "Penyimpanan RDF"),
            repeatable("3.6", "Kualitas Visual Produk RDF"),
            repeatable("3.7", "Ukuran"),
            repeatable("3.8", "Kelembaban"),
            repeatable("3.9", "Manajemen Lindi"),
            repeatable("3.10", "Kontrol Kualitas & Laboratorium (Sampel)"),
        ],
    },
    SectionTemplate {
        title: "4. Equipment & Operational Condition",
        items: &[
            repeatable("4.1", "Kondisi Mesin (Shredder, Conveyor)"),
            repeatable("4.2", "Sistem Proteksi Mesin (Guard, Interlock)"),
            repeatable("4.3", "Pemantauan Kondisi Mesin"),
            repeatable("4.4", "Sistem Proteksi Kebakaran"),
            repeatable("4.5", "Sistem Deteksi & Pemadaman Api Otomatis"),
        ],
    },
    SectionTemplate {
        title: "5. Environmental Management & Compliance",
        items: &[
            repeatable("5.1", "Sistem Manajemen Lindi"),
            repeatable("5.2", "Pengendalian Emisi Debu & Bau"),
            repeatable("5.3", "Manajemen Limbah B3 & Residu"),
            repeatable("5.4", "Kepatuhan terhadap Izin Lingkungan"),
        ],
    },
    SectionTemplate {
        title: "6. Emergency Preparedness",
        items: &[
            repeatable("6.1", "Prosedur Tanggap Darurat (ERP)"),
            repeatable("6.2", "Sistem Alarm & Komunikasi Darurat"),
            repeatable("6.3", "Pelatihan & Simulasi Tanggap Darurat"),
            repeatable("6.4", "Ketersediaan APAR & Hidran"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn section_titles_and_item_ids_are_unique() {
        let titles: HashSet<_> = CHECKLIST.iter().map(|s| s.title).collect();
        assert_eq!(titles.len(), CHECKLIST.len());
        let ids: Vec<_> = CHECKLIST
            .iter()
            .flat_map(|s| s.items.iter().map(|i| i.id))
            .collect();
        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(ids.len(), 37);
    }
}
