//! Output document assembly
//!
//! Pages are appended in call order. Each image page carries one JPEG image
//! XObject drawn into its placement rectangle.

use crate::constants::mm_to_pt;
use crate::layout::Placement;
use crate::raster::PreparedRaster;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

const IMAGE_NAME: &str = "Im0";

pub(crate) struct PdfBuilder {
    output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    page_width_mm: f32,
    page_height_mm: f32,
}

impl PdfBuilder {
    pub(crate) fn new(page_width_mm: f32, page_height_mm: f32) -> Self {
        let mut output = Document::with_version("1.7");
        let pages_tree_id = output.new_object_id();
        Self {
            output,
            pages_tree_id,
            page_refs: Vec::new(),
            page_width_mm,
            page_height_mm,
        }
    }

    pub(crate) fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Append a page with nothing drawn on it
    pub(crate) fn add_blank_page(&mut self) -> ObjectId {
        self.add_page(Vec::new(), Dictionary::new())
    }

    /// Append a page showing `raster` at `placement`
    pub(crate) fn add_image_page(
        &mut self,
        raster: PreparedRaster,
        placement: &Placement,
    ) -> ObjectId {
        let image_id = self.output.add_object(image_xobject(raster));

        let mut xobjects = Dictionary::new();
        xobjects.set(IMAGE_NAME, Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let x = mm_to_pt(placement.x_mm);
        let y = mm_to_pt(placement.bottom_mm(self.page_height_mm));
        let width = mm_to_pt(placement.width_mm);
        let height = mm_to_pt(placement.height_mm);
        let content = format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            width, height, x, y, IMAGE_NAME
        );

        self.add_page(content.into_bytes(), resources)
    }

    fn add_page(&mut self, content: Vec<u8>, resources: Dictionary) -> ObjectId {
        let content_id = self
            .output
            .add_object(Stream::new(Dictionary::new(), content));

        let page_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(self.pages_tree_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(mm_to_pt(self.page_width_mm)),
                    Object::Real(mm_to_pt(self.page_height_mm)),
                ]),
            ),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]);

        let page_id = self.output.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
        page_id
    }

    /// Close the page tree and serialize the document
    pub(crate) fn finish(mut self) -> Result<Vec<u8>> {
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));
        self.output.trailer.set("Root", catalog_id);

        let mut writer = Vec::new();
        self.output.save_to(&mut writer)?;
        Ok(writer)
    }
}

fn image_xobject(raster: PreparedRaster) -> Stream {
    let dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(raster.width as i64)),
        ("Height", Object::Integer(raster.height as i64)),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::Name(b"DCTDecode".to_vec())),
    ]);
    // Already compressed; keep lopdf from flate-encoding it again
    Stream::new(dict, raster.jpeg).with_compression(false)
}
