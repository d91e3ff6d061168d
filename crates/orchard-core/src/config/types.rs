//! Configuration types
//!
//! A project file describes every app managed by Orchard. Each app carries
//! the desired App Store state: store metadata, localized listings, version
//! information with screenshots and previews, review details, and TestFlight
//! configuration. Collections are keyed by their natural key (locale code,
//! group name, tester email) so they can be matched against remote records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A project is a mapping of app name to app configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Project {
    /// Apps managed by this project, keyed by a human-readable name
    pub apps: BTreeMap<String, App>,
}

impl Project {
    /// Returns the names of apps matching the given filter.
    ///
    /// Names not present in the project are dropped. When `default_all` is
    /// set, an empty filter selects every app.
    pub fn apps_matching(&self, names: &[String], default_all: bool) -> Vec<String> {
        if default_all && names.iter().all(|n| n.is_empty()) {
            return self.apps.keys().cloned().collect();
        }
        names
            .iter()
            .filter(|n| self.apps.contains_key(*n))
            .cloned()
            .collect()
    }
}

/// Desired App Store state for a single app
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct App {
    /// Bundle identifier used to look up the app
    pub bundle_id: String,

    /// Primary locale, e.g. "en-US"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_locale: Option<String>,

    /// Whether the app uses third-party content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_third_party_content: Option<bool>,

    /// Territory availability and pricing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,

    /// Category assignments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Categories>,

    /// Age rating declaration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_rating: Option<AgeRating>,

    /// App-level localized listing metadata, keyed by locale
    pub localizations: AppLocalizations,

    /// Version to create or update on each release
    pub versions: Version,

    /// TestFlight beta configuration
    pub testflight: Testflight,
}

/// App localizations keyed by locale code
pub type AppLocalizations = BTreeMap<String, AppLocalization>;

/// Localized app-level listing metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppLocalization {
    /// Display name
    pub name: String,

    /// Subtitle shown under the name
    pub subtitle: String,

    /// Privacy policy text (tvOS only)
    pub privacy_policy_text: String,

    /// Privacy policy URL
    pub privacy_policy_url: String,
}

/// Territory availability and pricing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Availability {
    /// Whether the app becomes available in new territories automatically
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_in_new_territories: Option<bool>,

    /// Price schedules to apply
    pub pricing: Vec<PriceSchedule>,

    /// Territory identifiers the app is available in
    pub territories: Vec<String>,
}

/// A single price schedule entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceSchedule {
    /// Price tier identifier
    pub tier: String,

    /// Date the price takes effect; immediately when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
}

/// Primary and secondary category assignments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Categories {
    /// Primary category identifier
    pub primary: String,

    /// Up to two primary subcategories
    pub primary_subcategories: Vec<String>,

    /// Secondary category identifier
    pub secondary: String,

    /// Up to two secondary subcategories
    pub secondary_subcategories: Vec<String>,
}

/// Intensity level for an age rating dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Intensity {
    /// Content does not appear
    None,
    /// Content appears infrequently or is mild
    InfrequentOrMild,
    /// Content appears frequently or is intense
    FrequentOrIntense,
}

impl Intensity {
    /// The wire value the catalog service expects
    pub fn api_value(self) -> &'static str {
        match self {
            Intensity::None => "NONE",
            Intensity::InfrequentOrMild => "INFREQUENT_OR_MILD",
            Intensity::FrequentOrIntense => "FREQUENT_OR_INTENSE",
        }
    }
}

/// Kids age band for the Kids category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KidsAgeBand {
    /// Five and under
    FiveAndUnder,
    /// Six to eight
    SixToEight,
    /// Nine to eleven
    NineToEleven,
}

impl KidsAgeBand {
    /// The wire value the catalog service expects
    pub fn api_value(self) -> &'static str {
        match self {
            KidsAgeBand::FiveAndUnder => "FIVE_AND_UNDER",
            KidsAgeBand::SixToEight => "SIX_TO_EIGHT",
            KidsAgeBand::NineToEleven => "NINE_TO_ELEVEN",
        }
    }
}

/// Age rating declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgeRating {
    /// Alcohol, tobacco, or drug use or references
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcohol_tobacco_or_drug_use: Option<Intensity>,

    /// Simulated gambling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gambling_simulated: Option<Intensity>,

    /// Real gambling and contests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gambling_and_contests: Option<bool>,

    /// Horror or fear themes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horror_or_fear_themes: Option<Intensity>,

    /// Mature or suggestive themes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mature_or_suggestive_themes: Option<Intensity>,

    /// Medical or treatment information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_or_treatment_information: Option<Intensity>,

    /// Profanity or crude humor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profanity_or_crude_humor: Option<Intensity>,

    /// Sexual content or nudity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sexual_content_or_nudity: Option<Intensity>,

    /// Unrestricted web access
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrestricted_web_access: Option<bool>,

    /// Cartoon or fantasy violence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violence_cartoon_or_fantasy: Option<Intensity>,

    /// Realistic violence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violence_realistic: Option<Intensity>,

    /// Kids age band
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kids_age_band: Option<KidsAgeBand>,
}

/// App Store platform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// iOS and iPadOS
    #[default]
    #[serde(rename = "iOS")]
    IOs,
    /// macOS
    #[serde(rename = "macOS")]
    MacOs,
    /// tvOS
    #[serde(rename = "tvOS")]
    TvOs,
}

impl Platform {
    /// The wire value the catalog service expects
    pub fn api_value(self) -> &'static str {
        match self {
            Platform::IOs => "IOS",
            Platform::MacOs => "MAC_OS",
            Platform::TvOs => "TV_OS",
        }
    }
}

/// How a version is released once approved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReleaseType {
    /// Released manually by the developer
    #[default]
    Manual,
    /// Released automatically after approval
    AfterApproval,
    /// Released on a scheduled date
    Scheduled,
}

impl ReleaseType {
    /// The wire value the catalog service expects
    pub fn api_value(self) -> &'static str {
        match self {
            ReleaseType::Manual => "MANUAL",
            ReleaseType::AfterApproval => "AFTER_APPROVAL",
            ReleaseType::Scheduled => "SCHEDULED",
        }
    }
}

/// Desired state of the App Store version published on each release
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Version {
    /// Target platform
    pub platform: Platform,

    /// Copyright line, e.g. "2026 Example Corp."
    pub copyright: String,

    /// Earliest date the version may be released
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest_release_date: Option<DateTime<Utc>>,

    /// Release type
    pub release_type: ReleaseType,

    /// Version-level localized listing metadata, keyed by locale
    pub localizations: VersionLocalizations,

    /// Advertising identifier declaration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idfa_declaration: Option<IdfaDeclaration>,

    /// Routing coverage file for apps with maps integration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_coverage: Option<FileRef>,

    /// Details provided to App Review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_details: Option<ReviewDetails>,

    /// Whether to enable phased release after approval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_phased_release: Option<bool>,
}

/// Version localizations keyed by locale code
pub type VersionLocalizations = BTreeMap<String, VersionLocalization>;

/// Localized version-level listing metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionLocalization {
    /// Store listing description
    pub description: String,

    /// Comma-separated search keywords
    pub keywords: String,

    /// Marketing URL
    pub marketing_url: String,

    /// Promotional text, updatable without review
    pub promotional_text: String,

    /// Support URL
    pub support_url: String,

    /// Release notes for this version
    pub whats_new: String,

    /// App preview video sets, keyed by preview type
    pub preview_sets: PreviewSets,

    /// Screenshot sets, keyed by display type
    pub screenshot_sets: ScreenshotSets,
}

/// Preview sets keyed by preview type, e.g. "IPHONE_65"
pub type PreviewSets = BTreeMap<String, Vec<FileRef>>;

/// Screenshot sets keyed by display type, e.g. "APP_IPHONE_65"
pub type ScreenshotSets = BTreeMap<String, Vec<FileRef>>;

/// A reference to a local asset file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileRef {
    /// Path to the file, relative to the working directory
    pub path: PathBuf,
}

/// Advertising identifier declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdfaDeclaration {
    /// IDFA is used to serve ads within the app
    pub serves_ads: bool,

    /// IDFA is used to attribute app actions to a previous ad
    pub attributes_action_with_previous_ad: bool,

    /// IDFA is used to attribute installation to a previous ad
    pub attributes_app_installation_to_previous_ad: bool,

    /// The app honors the limited ad tracking setting
    pub honors_limited_ad_tracking: bool,
}

/// Details provided to App Review alongside a submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewDetails {
    /// Contact person for review questions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,

    /// Demo account credentials for the review team
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_account: Option<DemoAccount>,

    /// Free-form notes to the review team
    pub notes: String,

    /// Attachment files to include with the review
    pub attachments: Vec<FileRef>,
}

/// Review contact person
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    /// Email address
    pub email: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Phone number
    pub phone: String,
}

/// Demo account credentials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DemoAccount {
    /// Account name
    pub name: String,
    /// Account password
    pub password: String,
    /// Whether a demo account is required to review the app
    pub required: bool,
}

/// TestFlight beta configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Testflight {
    /// Notify testers automatically when a build becomes available
    pub enable_auto_notify: bool,

    /// Beta license agreement text
    pub license_agreement: String,

    /// Beta localized metadata, keyed by locale
    pub localizations: TestflightLocalizations,

    /// Beta groups to configure, matched by name
    pub beta_groups: Vec<BetaGroup>,

    /// Individual testers assigned outside any group, matched by email
    pub beta_testers: Vec<BetaTester>,

    /// Details provided to Beta App Review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_details: Option<ReviewDetails>,
}

/// TestFlight localizations keyed by locale code
pub type TestflightLocalizations = BTreeMap<String, TestflightLocalization>;

/// Localized TestFlight metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestflightLocalization {
    /// Beta app description
    pub description: String,

    /// Email testers can send feedback to
    pub feedback_email: String,

    /// Marketing URL
    pub marketing_url: String,

    /// Privacy policy URL
    pub privacy_policy_url: String,

    /// Privacy policy text (tvOS only)
    pub tv_os_privacy_policy: String,

    /// What to test in this build
    pub whats_new: String,
}

/// A TestFlight beta group, matched against remote groups by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BetaGroup {
    /// Group name; a group with no name is skipped during sync
    pub name: String,

    /// Whether testers can send feedback from the app
    pub feedback_enabled: bool,

    /// Whether a public invitation link is active
    pub enable_public_link: bool,

    /// Whether the public link has an enrollment limit
    pub enable_public_link_limit: bool,

    /// Maximum testers that can join via the public link
    pub public_link_limit: i64,

    /// Testers to enroll in this group, matched by email
    pub testers: Vec<BetaTester>,
}

/// A TestFlight beta tester, matched against remote testers by email
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BetaTester {
    /// Email address; a tester with no email is skipped during sync
    pub email: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with(names: &[&str]) -> Project {
        let mut apps = BTreeMap::new();
        for name in names {
            apps.insert(name.to_string(), App::default());
        }
        Project { apps }
    }

    #[test]
    fn test_apps_matching() {
        let p = project_with(&["App1", "App2", "App3"]);

        let all = ["App1", "App2", "App3"].map(String::from);
        assert_eq!(p.apps_matching(&all, false), vec!["App1", "App2", "App3"]);

        let some = ["App1", "App2"].map(String::from);
        assert_eq!(p.apps_matching(&some, false), vec!["App1", "App2"]);

        let with_unknown = ["App1", "App4"].map(String::from);
        assert_eq!(p.apps_matching(&with_unknown, false), vec!["App1"]);

        let empty = ["".to_string(), "".to_string()];
        assert!(p.apps_matching(&empty, false).is_empty());
        assert_eq!(p.apps_matching(&empty, true).len(), 3);
        assert_eq!(p.apps_matching(&[], true).len(), 3);
    }

    #[test]
    fn test_platform_api_values() {
        assert_eq!(Platform::IOs.api_value(), "IOS");
        assert_eq!(Platform::MacOs.api_value(), "MAC_OS");
        assert_eq!(Platform::TvOs.api_value(), "TV_OS");
    }

    #[test]
    fn test_intensity_api_values() {
        assert_eq!(Intensity::None.api_value(), "NONE");
        assert_eq!(
            Intensity::InfrequentOrMild.api_value(),
            "INFREQUENT_OR_MILD"
        );
        assert_eq!(
            Intensity::FrequentOrIntense.api_value(),
            "FREQUENT_OR_INTENSE"
        );
    }

    #[test]
    fn test_project_round_trip() {
        let yaml = r#"
MyApp:
  bundleId: com.example.myapp
  primaryLocale: en-US
  localizations:
    en-US:
      name: My App
      subtitle: Does things
  versions:
    platform: iOS
    copyright: 2026 Example Corp.
    localizations:
      en-US:
        description: A fine app.
        whatsNew: Bug fixes.
  testflight:
    betaGroups:
      - name: External
        feedbackEnabled: true
        testers:
          - email: tester@example.com
            firstName: Test
            lastName: Er
"#;
        let project: Project = serde_yaml::from_str(yaml).unwrap();
        let app = project.apps.get("MyApp").unwrap();
        assert_eq!(app.bundle_id, "com.example.myapp");
        assert_eq!(app.localizations["en-US"].name, "My App");
        assert_eq!(app.versions.platform, Platform::IOs);
        assert_eq!(app.testflight.beta_groups[0].name, "External");
        assert_eq!(
            app.testflight.beta_groups[0].testers[0].email,
            "tester@example.com"
        );

        let rendered = serde_yaml::to_string(&project).unwrap();
        let reparsed: Project = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(project, reparsed);
    }
}
