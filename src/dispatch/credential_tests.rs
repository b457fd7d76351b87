//! Tests for credential resolution.

use super::{Credential, CredentialError, CredentialParams};

fn oauth_params() -> CredentialParams {
    CredentialParams {
        consumer_key: Some("ck".to_string()),
        consumer_secret: Some("cs".to_string()),
        access_token: Some("at".to_string()),
        access_secret: Some("as".to_string()),
        ..CredentialParams::default()
    }
}

mod resolve {
    use super::*;

    #[test]
    fn bearer_token_alone_selects_bearer() {
        let params = CredentialParams {
            bearer_token: Some("token".to_string()),
            ..CredentialParams::default()
        };

        assert_eq!(params.resolve(), Ok(Credential::bearer("token")));
    }

    #[test]
    fn all_four_oauth_fields_select_oauth1() {
        assert_eq!(
            oauth_params().resolve(),
            Ok(Credential::oauth1("ck", "cs", "at", "as"))
        );
    }

    #[test]
    fn nothing_supplied_is_missing() {
        assert_eq!(
            CredentialParams::default().resolve(),
            Err(CredentialError::Missing)
        );
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let params = CredentialParams {
            bearer_token: Some(String::new()),
            consumer_key: Some(String::new()),
            ..CredentialParams::default()
        };

        assert_eq!(params.resolve(), Err(CredentialError::Missing));
    }

    #[test]
    fn partial_oauth_names_every_missing_field() {
        let params = CredentialParams {
            consumer_key: Some("ck".to_string()),
            access_token: Some("at".to_string()),
            ..CredentialParams::default()
        };

        assert_eq!(
            params.resolve(),
            Err(CredentialError::IncompleteOAuth {
                missing: vec!["consumer_secret", "access_secret"],
            })
        );
    }

    #[test]
    fn single_missing_oauth_field_is_reported() {
        let params = CredentialParams {
            access_secret: Some(String::new()),
            ..oauth_params()
        };

        let err = params.resolve().unwrap_err();
        assert_eq!(
            err,
            CredentialError::IncompleteOAuth {
                missing: vec!["access_secret"],
            }
        );
        assert!(err.to_string().contains("access_secret"));
    }

    #[test]
    fn bearer_with_oauth_fields_is_ambiguous() {
        let params = CredentialParams {
            bearer_token: Some("token".to_string()),
            ..oauth_params()
        };

        assert_eq!(params.resolve(), Err(CredentialError::Ambiguous));
    }

    #[test]
    fn bearer_with_partial_oauth_is_still_ambiguous() {
        let params = CredentialParams {
            bearer_token: Some("token".to_string()),
            consumer_key: Some("ck".to_string()),
            ..CredentialParams::default()
        };

        assert_eq!(params.resolve(), Err(CredentialError::Ambiguous));
    }
}

mod scheme_hint {
    use super::*;

    #[test]
    fn reports_the_selected_scheme() {
        let bearer = CredentialParams {
            bearer_token: Some("t".to_string()),
            ..CredentialParams::default()
        };

        assert_eq!(bearer.scheme_hint(), "bearer");
        assert_eq!(oauth_params().scheme_hint(), "oauth1");
        assert_eq!(CredentialParams::default().scheme_hint(), "none");
    }
}

mod redaction {
    use super::*;

    #[test]
    fn credential_debug_hides_secrets() {
        let bearer = format!("{:?}", Credential::bearer("super-secret-token"));
        let oauth = format!("{:?}", Credential::oauth1("ck", "consumer-secret", "at", "access-secret"));

        assert!(!bearer.contains("super-secret-token"));
        assert!(!oauth.contains("consumer-secret"));
        assert!(!oauth.contains("access-secret"));
        assert!(oauth.contains("ck"));
    }

    #[test]
    fn params_debug_hides_secrets() {
        let params = CredentialParams {
            bearer_token: Some("bearer-secret".to_string()),
            ..oauth_params()
        };
        let debug = format!("{params:?}");

        assert!(!debug.contains("bearer-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn scheme_names_are_stable() {
        assert_eq!(Credential::bearer("t").scheme(), "bearer");
        assert_eq!(Credential::oauth1("a", "b", "c", "d").scheme(), "oauth1");
    }
}

mod deserialize {
    use super::*;

    #[test]
    fn parses_from_toml_table() {
        let params: CredentialParams = toml::from_str(
            r#"
            consumer_key = "ck"
            consumer_secret = "cs"
            "#,
        )
        .unwrap();

        assert_eq!(params.consumer_key.as_deref(), Some("ck"));
        assert!(params.bearer_token.is_none());
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<CredentialParams, _> = toml::from_str(r#"password = "x""#);

        assert!(result.is_err());
    }
}
