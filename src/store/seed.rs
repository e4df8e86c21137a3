//! Seed data loaded into a fresh study store

use chrono::{DateTime, Utc};

use crate::store::types::{
    ApplicationStatus, RequirementType, Study, StudyApplication, StudyCategory, StudyLocation,
    StudyMethodology, StudyRequirement, StudyStatus,
};

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

fn req(id: &str, kind: RequirementType, description: &str, required: bool) -> StudyRequirement {
    StudyRequirement::new(id, kind, description, required)
}

/// The eight studies the marketplace starts with, in their listing order
pub fn studies() -> Vec<Study> {
    use RequirementType::{Age, Custom, Experience, Location};

    vec![
        Study {
            id: "1".to_string(),
            title: "E-commerce Mobile App Usability Study".to_string(),
            description: "We're looking for participants to test our new mobile shopping app. \
                          You'll complete typical shopping tasks while we observe and gather feedback."
                .to_string(),
            category: StudyCategory::UxResearch,
            methodology: StudyMethodology::UsabilityTest,
            compensation: 150.0,
            duration: "60 minutes".to_string(),
            participant_limit: 12,
            current_applications: 8,
            requirements: vec![
                req("1", Age, "25-45 years old", true),
                req("2", Experience, "Regular online shopper (3+ times per month)", true),
                req("3", Custom, "Own an iPhone or Android device", true),
            ],
            location: StudyLocation::Remote,
            status: StudyStatus::Active,
            researcher_id: "r1".to_string(),
            created_at: at("2024-01-15T10:00:00Z"),
            deadline: "2024-02-01T23:59:59Z".to_string(),
            tags: tags(&["Mobile", "E-commerce", "Usability"]),
        },
        Study {
            id: "2".to_string(),
            title: "Financial Planning Tool User Interviews".to_string(),
            description: "Help us understand how people approach personal financial planning. \
                          We'll discuss your current tools, pain points, and ideal features."
                .to_string(),
            category: StudyCategory::UserInterviews,
            methodology: StudyMethodology::Interview,
            compensation: 200.0,
            duration: "45 minutes".to_string(),
            participant_limit: 8,
            current_applications: 3,
            requirements: vec![
                req("1", Age, "30-55 years old", true),
                req("2", Custom, "Household income $50k+", true),
                req("3", Experience, "Currently use budgeting or investment tools", false),
            ],
            location: StudyLocation::Remote,
            status: StudyStatus::Active,
            researcher_id: "r2".to_string(),
            created_at: at("2024-01-14T14:30:00Z"),
            deadline: "2024-01-30T23:59:59Z".to_string(),
            tags: tags(&["Finance", "Planning", "Interviews"]),
        },
        Study {
            id: "3".to_string(),
            title: "Healthcare Portal Navigation Study".to_string(),
            description: "Test our patient portal interface and help us improve the user \
                          experience for managing medical appointments and records."
                .to_string(),
            category: StudyCategory::UxResearch,
            methodology: StudyMethodology::UsabilityTest,
            compensation: 175.0,
            duration: "90 minutes".to_string(),
            participant_limit: 15,
            current_applications: 11,
            requirements: vec![
                req("1", Age, "21+ years old", true),
                req("2", Custom, "Has used online healthcare services", true),
                req("3", Location, "US residents only", true),
            ],
            location: StudyLocation::Hybrid,
            status: StudyStatus::Active,
            researcher_id: "r1".to_string(),
            created_at: at("2024-01-12T09:15:00Z"),
            deadline: "2024-01-28T23:59:59Z".to_string(),
            tags: tags(&["Healthcare", "Portal", "Navigation"]),
        },
        Study {
            id: "4".to_string(),
            title: "Social Media Platform Survey".to_string(),
            description: "Quick survey about your social media usage patterns and preferences. \
                          Help shape the future of social platforms."
                .to_string(),
            category: StudyCategory::Survey,
            methodology: StudyMethodology::Survey,
            compensation: 25.0,
            duration: "15 minutes".to_string(),
            participant_limit: 100,
            current_applications: 67,
            requirements: vec![
                req("1", Age, "18-35 years old", true),
                req("2", Custom, "Active on 2+ social media platforms", true),
            ],
            location: StudyLocation::Remote,
            status: StudyStatus::Active,
            researcher_id: "r3".to_string(),
            created_at: at("2024-01-10T11:00:00Z"),
            deadline: "2024-01-25T23:59:59Z".to_string(),
            tags: tags(&["Social Media", "Survey", "Quick"]),
        },
        Study {
            id: "5".to_string(),
            title: "Smart Home Device Focus Group".to_string(),
            description: "Join a focus group discussion about smart home technologies, privacy \
                          concerns, and future features you'd like to see."
                .to_string(),
            category: StudyCategory::FocusGroup,
            methodology: StudyMethodology::FocusGroup,
            compensation: 300.0,
            duration: "2 hours".to_string(),
            participant_limit: 6,
            current_applications: 4,
            requirements: vec![
                req("1", Custom, "Own 2+ smart home devices", true),
                req("2", Age, "25-50 years old", true),
                req("3", Location, "San Francisco Bay Area", true),
            ],
            location: StudyLocation::InPerson,
            status: StudyStatus::Active,
            researcher_id: "r2".to_string(),
            created_at: at("2024-01-08T16:45:00Z"),
            deadline: "2024-01-22T23:59:59Z".to_string(),
            tags: tags(&["Smart Home", "IoT", "Focus Group"]),
        },
        Study {
            id: "6".to_string(),
            title: "AI-Powered Productivity App Beta Testing".to_string(),
            description: "Test our new AI-powered productivity application and provide feedback \
                          on features, usability, and overall experience. Help us shape the \
                          future of workplace productivity."
                .to_string(),
            category: StudyCategory::ProductTesting,
            methodology: StudyMethodology::UsabilityTest,
            compensation: 125.0,
            duration: "75 minutes".to_string(),
            participant_limit: 20,
            current_applications: 12,
            requirements: vec![
                req("1", Age, "22-50 years old", true),
                req("2", Experience, "Uses productivity apps regularly", true),
                req("3", Custom, "Works in knowledge-based role", false),
            ],
            location: StudyLocation::Remote,
            status: StudyStatus::Active,
            researcher_id: "r1".to_string(),
            created_at: at("2024-01-18T11:00:00Z"),
            deadline: "2024-02-05T23:59:59Z".to_string(),
            tags: tags(&["AI", "Productivity", "Beta Testing", "Remote"]),
        },
        Study {
            id: "7".to_string(),
            title: "Sustainable Fashion Shopping Behavior Study".to_string(),
            description: "Participate in interviews about sustainable fashion choices, shopping \
                          habits, and brand preferences. Help us understand consumer behavior in \
                          the eco-friendly fashion space."
                .to_string(),
            category: StudyCategory::MarketResearch,
            methodology: StudyMethodology::Interview,
            compensation: 180.0,
            duration: "50 minutes".to_string(),
            participant_limit: 15,
            current_applications: 7,
            requirements: vec![
                req("1", Age, "25-40 years old", true),
                req("2", Custom, "Interested in sustainable fashion", true),
                req("3", Custom, "Shops online regularly", false),
            ],
            location: StudyLocation::Hybrid,
            status: StudyStatus::Active,
            researcher_id: "r3".to_string(),
            created_at: at("2024-01-16T09:30:00Z"),
            deadline: "2024-02-02T23:59:59Z".to_string(),
            tags: tags(&["Fashion", "Sustainability", "Consumer Behavior", "Interviews"]),
        },
        Study {
            id: "8".to_string(),
            title: "Cryptocurrency Trading Platform Usability".to_string(),
            description: "Test our new cryptocurrency trading interface designed for beginners. \
                          We'll observe how you navigate the platform and complete common trading \
                          tasks."
                .to_string(),
            category: StudyCategory::UxResearch,
            methodology: StudyMethodology::UsabilityTest,
            compensation: 220.0,
            duration: "90 minutes".to_string(),
            participant_limit: 10,
            current_applications: 5,
            requirements: vec![
                req("1", Age, "21+ years old", true),
                req("2", Custom, "Basic knowledge of cryptocurrency", true),
                req("3", Experience, "Has used trading platforms before", false),
            ],
            location: StudyLocation::Remote,
            status: StudyStatus::Active,
            researcher_id: "r2".to_string(),
            created_at: at("2024-01-17T14:15:00Z"),
            deadline: "2024-02-03T23:59:59Z".to_string(),
            tags: tags(&["Cryptocurrency", "Trading", "Fintech", "Usability"]),
        },
    ]
}

/// Applications already on file for participant `p1`
pub fn applications() -> Vec<StudyApplication> {
    vec![
        StudyApplication {
            id: "a1".to_string(),
            study_id: "1".to_string(),
            participant_id: "p1".to_string(),
            status: ApplicationStatus::Approved,
            applied_at: at("2024-01-16T10:30:00Z"),
            responses: Vec::new(),
        },
        StudyApplication {
            id: "a2".to_string(),
            study_id: "2".to_string(),
            participant_id: "p1".to_string(),
            status: ApplicationStatus::Pending,
            applied_at: at("2024-01-15T14:20:00Z"),
            responses: Vec::new(),
        },
    ]
}
