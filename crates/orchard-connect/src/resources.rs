//! Remote record types returned by the catalog service.
//!
//! Every record carries an opaque identifier and the attributes the sync
//! needs: the natural key used for matching (locale, name, email, asset
//! type) and, for binary assets, the stored content fingerprint from the
//! last committed upload.

use serde::Deserialize;

/// A single-resource response envelope
#[derive(Debug, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

/// A collection response envelope
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: AppAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppAttributes {
    pub bundle_id: Option<String>,
    pub name: Option<String>,
    pub primary_locale: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppInfoRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: AppInfoAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppInfoAttributes {
    pub app_store_state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppInfoLocalizationRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: AppInfoLocalizationAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppInfoLocalizationAttributes {
    pub locale: Option<String>,
    pub name: Option<String>,
    pub subtitle: Option<String>,
    pub privacy_policy_text: Option<String>,
    pub privacy_policy_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppStoreVersionRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: AppStoreVersionAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppStoreVersionAttributes {
    pub version_string: Option<String>,
    pub app_store_state: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionLocalizationRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: VersionLocalizationAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionLocalizationAttributes {
    pub locale: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub whats_new: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: BuildAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildAttributes {
    pub version: Option<String>,
    pub processing_state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgeRatingDeclarationRecord {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdfaDeclarationRecord {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TerritoryRecord {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewSetRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: PreviewSetAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreviewSetAttributes {
    pub preview_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreenshotSetRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: ScreenshotSetAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreenshotSetAttributes {
    pub screenshot_display_type: Option<String>,
}

/// A binary asset record: screenshots, previews, attachments, and the
/// routing coverage file all share this shape.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: AssetAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetAttributes {
    pub file_name: Option<String>,
    pub source_file_checksum: Option<String>,
    pub upload_operations: Vec<UploadOperation>,
}

/// One byte-range transfer operation from an upload-capable create response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOperation {
    #[serde(default)]
    pub method: Option<String>,
    pub url: String,
    pub length: u64,
    pub offset: u64,
    #[serde(default)]
    pub request_headers: Vec<UploadHeader>,
}

/// A header a transfer operation must carry
#[derive(Debug, Clone, Deserialize)]
pub struct UploadHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewDetailRecord {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhasedReleaseRecord {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BetaAppLocalizationRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: LocaleAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BetaBuildLocalizationRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: LocaleAttributes,
}

/// Attributes for records matched purely by locale
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocaleAttributes {
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BetaGroupRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: BetaGroupAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BetaGroupAttributes {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BetaTesterRecord {
    pub id: String,
    #[serde(default)]
    pub attributes: BetaTesterAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BetaTesterAttributes {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BetaBuildDetailRecord {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BetaLicenseAgreementRecord {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BetaReviewDetailRecord {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_record_parses_upload_operations() {
        let json = r#"{
            "data": {
                "id": "asset-1",
                "attributes": {
                    "fileName": "shot1.png",
                    "sourceFileChecksum": null,
                    "uploadOperations": [
                        {
                            "method": "PUT",
                            "url": "https://upload.example.com/part1",
                            "length": 1024,
                            "offset": 0,
                            "requestHeaders": [
                                {"name": "Content-Type", "value": "image/png"}
                            ]
                        }
                    ]
                }
            }
        }"#;

        let doc: Document<AssetRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(doc.data.id, "asset-1");
        assert_eq!(doc.data.attributes.file_name.as_deref(), Some("shot1.png"));
        let op = &doc.data.attributes.upload_operations[0];
        assert_eq!(op.length, 1024);
        assert_eq!(op.request_headers[0].name, "Content-Type");
    }

    #[test]
    fn test_record_without_attributes_parses() {
        let json = r#"{"data": [{"id": "group-1"}]}"#;
        let collection: Collection<BetaGroupRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(collection.data[0].id, "group-1");
        assert!(collection.data[0].attributes.name.is_none());
    }
}
