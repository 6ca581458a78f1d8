use fund_portal::{
    models::{
        ContactMessageRequest, CreateBranchRequest, CreateFundPriceRequest, CreateFundRequest,
        Fund, FundCategory, NewsStatus, SignInRequest, UpdateFundRequest,
    },
    validation,
};
use rust_decimal_macros::dec;
use uuid::Uuid;
use validator::Validate;

fn valid_fund() -> CreateFundRequest {
    CreateFundRequest {
        name: "Global Equity Fund".to_string(),
        slug: "global-equity-fund".to_string(),
        code: "AMC-EQ01".to_string(),
        category: FundCategory::Equity,
        risk_level: 5,
        currency: "USD".to_string(),
        description: None,
        inception_date: None,
        management_fee: Some(dec!(1.5)),
        is_active: true,
    }
}

fn failing_fields(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    fields
}

// --- Fund form ---

#[test]
fn test_fund_form_accepts_valid_input() {
    assert!(valid_fund().validate().is_ok());
}

#[test]
fn test_fund_form_rejects_empty_required_fields() {
    let request = CreateFundRequest {
        name: String::new(),
        slug: String::new(),
        code: String::new(),
        ..valid_fund()
    };

    let errors = request.validate().unwrap_err();
    assert_eq!(failing_fields(&errors), vec!["code", "name", "slug"]);
}

#[test]
fn test_fund_form_rejects_blank_name_and_bad_formats() {
    let request = CreateFundRequest {
        name: "   ".to_string(),
        slug: "Global Equity".to_string(),
        code: "eq01".to_string(),
        currency: "usd".to_string(),
        risk_level: 8,
        management_fee: Some(dec!(120)),
        ..valid_fund()
    };

    let errors = request.validate().unwrap_err();
    assert_eq!(
        failing_fields(&errors),
        vec!["code", "currency", "management_fee", "name", "risk_level", "slug"]
    );
}

#[test]
fn test_fund_update_validates_only_present_fields() {
    assert!(UpdateFundRequest::default().validate().is_ok());

    let update = UpdateFundRequest {
        slug: Some("bad slug".to_string()),
        ..Default::default()
    };
    assert_eq!(failing_fields(&update.validate().unwrap_err()), vec!["slug"]);
}

#[test]
fn test_fund_price_requires_positive_nav() {
    let price = CreateFundPriceRequest {
        fund_id: Uuid::new_v4(),
        price_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(),
        nav: dec!(0),
        bid: Some(dec!(10.25)),
        offer: None,
    };
    assert_eq!(failing_fields(&price.validate().unwrap_err()), vec!["nav"]);

    let price = CreateFundPriceRequest {
        nav: dec!(10.3120),
        ..price
    };
    assert!(price.validate().is_ok());
}

// --- Other forms ---

#[test]
fn test_contact_form_validation() {
    let valid = ContactMessageRequest {
        full_name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: Some("+62 21 555-0100".to_string()),
        subject: "Account opening".to_string(),
        message: "I would like to open an account.".to_string(),
    };
    assert!(valid.validate().is_ok());

    let invalid = ContactMessageRequest {
        email: "not-an-email".to_string(),
        phone: Some("call me".to_string()),
        message: "Hi".to_string(),
        ..valid
    };
    assert_eq!(
        failing_fields(&invalid.validate().unwrap_err()),
        vec!["email", "message", "phone"]
    );
}

#[test]
fn test_branch_coordinates_are_bounded() {
    let branch = CreateBranchRequest {
        name: "Head Office".to_string(),
        city: "Jakarta".to_string(),
        address: "Jl. Sudirman 1".to_string(),
        phone: None,
        email: None,
        latitude: Some(-6.2),
        longitude: Some(106.8),
        is_head_office: true,
    };
    assert!(branch.validate().is_ok());

    let branch = CreateBranchRequest {
        latitude: Some(-91.0),
        longitude: Some(181.0),
        ..branch
    };
    assert_eq!(
        failing_fields(&branch.validate().unwrap_err()),
        vec!["latitude", "longitude"]
    );
}

#[test]
fn test_sign_in_requires_email_and_password_length() {
    let request = SignInRequest {
        email: "admin@example.com".to_string(),
        password: "short".to_string(),
        remember_me: false,
    };
    assert_eq!(failing_fields(&request.validate().unwrap_err()), vec!["password"]);
}

#[test]
fn test_describe_formats_field_messages() {
    let request = CreateFundRequest {
        currency: "usd".to_string(),
        ..valid_fund()
    };
    let details = validation::describe(&request.validate().unwrap_err());
    assert_eq!(details, vec!["currency: must be a 3-letter ISO code".to_string()]);
}

// --- Serialization ---

#[test]
fn test_payload_serialization_skips_missing_options() {
    let json = serde_json::to_value(valid_fund()).unwrap();
    assert!(json.get("description").is_none());
    assert!(json.get("inception_date").is_none());
    assert_eq!(json["category"], "equity");
    assert_eq!(json["management_fee"], "1.5");
}

#[test]
fn test_fund_defaults_and_enum_parsing() {
    let request: CreateFundRequest = serde_json::from_value(serde_json::json!({
        "name": "Money Market Fund",
        "slug": "money-market",
        "code": "AMC-MM01",
        "category": "money_market",
        "risk_level": 1,
        "currency": "IDR"
    }))
    .unwrap();
    assert!(request.is_active);
    assert_eq!(request.category, FundCategory::MoneyMarket);

    let unknown = serde_json::from_value::<CreateFundRequest>(serde_json::json!({
        "name": "X", "slug": "x", "code": "X", "category": "crypto", "risk_level": 1, "currency": "IDR"
    }));
    assert!(unknown.is_err());
}

#[test]
fn test_backend_fund_record_decodes_numeric_fee() {
    let fund: Fund = serde_json::from_value(serde_json::json!({
        "id": Uuid::nil(),
        "name": "Balanced Fund",
        "slug": "balanced",
        "code": "AMC-BL01",
        "category": "balanced",
        "risk_level": 4,
        "currency": "IDR",
        "management_fee": 1.25,
        "is_active": true,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap();
    assert_eq!(fund.management_fee, Some(dec!(1.25)));
    assert_eq!(fund.description, None);
    assert_eq!(NewsStatus::default(), NewsStatus::Draft);
}
