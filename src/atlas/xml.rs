use serde::{Deserialize, Serialize};

use super::TextureAtlas;
use crate::error::Result;
use crate::sprite::{Region, Trim};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "TextureAtlas")]
struct AtlasRecord {
    #[serde(rename = "@imagePath", default)]
    image_path: String,
    #[serde(rename = "SubTexture", default)]
    sub_textures: Vec<SubTextureRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SubTextureRecord {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@x")]
    x: i32,
    #[serde(rename = "@y")]
    y: i32,
    #[serde(rename = "@width")]
    width: i32,
    #[serde(rename = "@height")]
    height: i32,
    #[serde(rename = "@frameX", default, skip_serializing_if = "Option::is_none")]
    frame_x: Option<i32>,
    #[serde(rename = "@frameY", default, skip_serializing_if = "Option::is_none")]
    frame_y: Option<i32>,
    #[serde(rename = "@frameWidth", default, skip_serializing_if = "Option::is_none")]
    frame_width: Option<i32>,
    #[serde(rename = "@frameHeight", default, skip_serializing_if = "Option::is_none")]
    frame_height: Option<i32>,
}

impl From<SubTextureRecord> for Region {
    fn from(record: SubTextureRecord) -> Self {
        // Missing frame attributes count as zero
        let trim = Trim::from_frame(
            record.frame_x.unwrap_or(0),
            record.frame_y.unwrap_or(0),
            record.frame_width.unwrap_or(0),
            record.frame_height.unwrap_or(0),
        );
        Region::new(
            record.name,
            record.x,
            record.y,
            record.width,
            record.height,
        )
        .with_trim(trim)
    }
}

impl From<&Region> for SubTextureRecord {
    fn from(region: &Region) -> Self {
        let (frame_x, frame_y, frame_width, frame_height) = match region.trim() {
            Trim::None => (None, None, None, None),
            Trim::Frame {
                x,
                y,
                width,
                height,
            } => (Some(x), Some(y), Some(width), Some(height)),
        };
        Self {
            name: region.name().to_string(),
            x: region.x(),
            y: region.y(),
            width: region.width(),
            height: region.height(),
            frame_x,
            frame_y,
            frame_width,
            frame_height,
        }
    }
}

pub(super) fn decode(xml_data: &[u8]) -> Result<TextureAtlas> {
    let record: AtlasRecord = quick_xml::de::from_reader(xml_data)?;
    let regions = record
        .sub_textures
        .into_iter()
        .map(Region::from)
        .collect();
    TextureAtlas::new(record.image_path, regions)
}

pub(super) fn encode(atlas: &TextureAtlas) -> Result<Vec<u8>> {
    let record = AtlasRecord {
        image_path: atlas.image_path().to_string(),
        sub_textures: atlas.iter().map(SubTextureRecord::from).collect(),
    };

    let mut xml = String::from(XML_DECLARATION);
    let mut serializer = quick_xml::se::Serializer::new(&mut xml);
    serializer.indent('\t', 1);
    record.serialize(serializer)?;
    xml.push('\n');

    Ok(xml.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SparrowError;

    const BOYFRIEND_XML: &str = include_str!("../../tests/fixtures/BOYFRIEND.xml");

    #[test]
    fn test_missing_frame_attributes_mean_untrimmed() {
        let atlas = TextureAtlas::parse(BOYFRIEND_XML.as_bytes()).unwrap();

        let note = atlas.lookup("BF NOTE DOWN0000").unwrap();
        assert_eq!(note.trim(), Trim::None);

        let miss = atlas.lookup("BF NOTE LEFT MISS0000").unwrap();
        assert_eq!(miss.trim(), Trim::None);
    }

    #[test]
    fn test_round_trip_preserves_fields_and_order() {
        let atlas = TextureAtlas::parse(BOYFRIEND_XML.as_bytes()).unwrap();

        let encoded = atlas.encode().unwrap();
        let decoded = TextureAtlas::parse(&encoded).unwrap();

        assert_eq!(decoded.image_path(), atlas.image_path());
        assert_eq!(decoded.all(), atlas.all());
    }

    #[test]
    fn test_encode_omits_frame_for_untrimmed() {
        let regions = vec![
            Region::new("plain", 0, 0, 8, 8),
            Region::new("trimmed", 8, 0, 6, 7).with_trim(Trim::from_frame(-1, -1, 8, 8)),
        ];
        let atlas = TextureAtlas::new("sheet.png", regions).unwrap();

        let xml = String::from_utf8(atlas.encode().unwrap()).unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("imagePath=\"sheet.png\""));
        assert!(xml.contains("frameX=\"-1\""));
        assert_eq!(xml.matches("frameX").count(), 1);
        assert!(xml.find("\"plain\"") < xml.find("\"trimmed\""));
    }

    #[test]
    fn test_malformed_xml() {
        let err = TextureAtlas::parse(b"<TextureAtlas><SubTexture name=\"a\" x=\"1\"").unwrap_err();

        assert!(matches!(err, SparrowError::AtlasParse(_)));
    }

    #[test]
    fn test_non_numeric_field() {
        let xml = br#"<TextureAtlas imagePath="a.png"><SubTexture name="a" x="one" y="0" width="1" height="1"/></TextureAtlas>"#;

        let err = TextureAtlas::parse(xml).unwrap_err();

        assert!(matches!(err, SparrowError::AtlasParse(_)));
    }

    #[test]
    fn test_duplicate_names_in_xml() {
        let xml = br#"<TextureAtlas imagePath="a.png">
            <SubTexture name="dup" x="0" y="0" width="1" height="1"/>
            <SubTexture name="dup" x="1" y="0" width="1" height="1"/>
        </TextureAtlas>"#;

        let err = TextureAtlas::parse(xml).unwrap_err();

        assert!(matches!(err, SparrowError::DuplicateRegionName(_)));
    }
}
