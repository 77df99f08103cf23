//! Validates a sign-up form and prints the error tree as JSON.
//!
//! Run with `RUST_LOG=nebula_validation=trace` to watch the executor.

use nebula_validation::prelude::*;
use tracing_subscriber::EnvFilter;

struct SignUp {
    username: String,
    email: String,
    age: Option<u8>,
    plan: String,
    addresses: Vec<Address>,
}

struct Address {
    street: String,
    zip: String,
}

fn address(address: &Address) -> Aggregation {
    aggregate![not_blank("street", &address.street), length("zip", &address.zip, 5)]
}

fn sign_up(form: &SignUp) -> Aggregation {
    aggregate![
        not_blank("username", &form.username),
        min_length("username", &form.username, 3),
        email("email", &form.email),
        greater_equal("age", form.age, 18_u8).optional(),
        member_of("plan", form.plan.clone(), ["free", "pro", "team"].map(str::to_owned)),
    ]
    .nested_list("address", &address, &form.addresses)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let form = SignUp {
        username: "sq".to_owned(),
        email: "squanchy@".to_owned(),
        age: None,
        plan: "enterprise".to_owned(),
        addresses: vec![
            Address {
                street: "Earth C-137".to_owned(),
                zip: "12345".to_owned(),
            },
            Address {
                street: String::new(),
                zip: "1".to_owned(),
            },
        ],
    };

    let greek = Env::builder().set("locale", "el").build();
    let templated = MessageFormatter::from_json_overrides(
        r#"{"min_length": "{field} needs {min}+ characters, got \"{value}\""}"#,
    )?;
    let formatter = templated
        .clone()
        .with_format_fn(move |kind, env, args| match (kind, env.get("locale")) {
            (ErrorKind::NotBlank, Some("el")) => format!("Το {} δεν μπορεί να είναι κενό", args.field()),
            _ => templated.render_template(kind, args),
        });

    let report = sign_up.validate_with(&form, &Env::empty(), &MessageFormatter::stock());
    println!("{report}");
    println!("{}", serde_json::to_string_pretty(&report)?);

    let localized = sign_up.validate_with(&form, &greek, &formatter);
    for (path, message) in localized.flatten() {
        println!("{path}: {message}");
    }

    Ok(())
}
