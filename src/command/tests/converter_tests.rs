//! Unit tests for built-in converters and parameter type resolution.

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;

use super::fixtures::{resolved_context, sample_resolved};
use crate::command::domain::{
    ArgumentError, ArgumentKind, ArgumentValue, ConstructionError, OptionType, ParameterType,
};
use crate::command::ports::MockCustomConverter;
use crate::command::services::{ConverterRegistry, ResolvedConverter};
use crate::interaction::domain::{InteractionContext, Snowflake};

#[fixture]
fn registry() -> ConverterRegistry {
    ConverterRegistry::new()
}

#[fixture]
fn ctx() -> Arc<InteractionContext> {
    resolved_context(sample_resolved())
}

fn resolve(registry: &ConverterRegistry, parameter_type: &ParameterType) -> ResolvedConverter {
    registry
        .resolve(parameter_type)
        .expect("parameter type should resolve")
}

async fn convert(
    resolved: &ResolvedConverter,
    ctx: &InteractionContext,
    raw: Value,
) -> Result<ArgumentValue, ArgumentError> {
    resolved.converter.convert(ctx, &raw).await
}

#[rstest]
#[case(ArgumentKind::Text, OptionType::String)]
#[case(ArgumentKind::Integer, OptionType::Integer)]
#[case(ArgumentKind::Boolean, OptionType::Boolean)]
#[case(ArgumentKind::User, OptionType::User)]
#[case(ArgumentKind::Member, OptionType::User)]
#[case(ArgumentKind::TextChannel, OptionType::Channel)]
#[case(ArgumentKind::CategoryChannel, OptionType::Channel)]
#[case(ArgumentKind::Role, OptionType::Role)]
#[case(ArgumentKind::Mentionable, OptionType::Mentionable)]
fn builtin_kinds_map_to_option_types(
    registry: ConverterRegistry,
    #[case] kind: ArgumentKind,
    #[case] expected: OptionType,
) {
    let resolved = resolve(&registry, &kind.into());

    assert_eq!(resolved.option_type, expected);
    assert!(resolved.required);
}

#[rstest]
fn every_kind_resolves_to_its_option_type(registry: ConverterRegistry) {
    let mismatched = ArgumentKind::ALL
        .into_iter()
        .filter(|kind| resolve(&registry, &(*kind).into()).option_type != kind.option_type())
        .collect::<Vec<_>>();

    assert!(mismatched.is_empty(), "mismatched kinds: {mismatched:?}");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn primitive_converters_check_json_shape(
    registry: ConverterRegistry,
    ctx: Arc<InteractionContext>,
) {
    let integer = resolve(&registry, &ParameterType::integer());

    assert_eq!(
        convert(&integer, &ctx, json!(7)).await,
        Ok(ArgumentValue::Integer(7))
    );
    assert!(matches!(
        convert(&integer, &ctx, json!("7")).await,
        Err(ArgumentError::TypeMismatch { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_converter_reads_resolved_table(
    registry: ConverterRegistry,
    ctx: Arc<InteractionContext>,
) {
    let user = resolve(&registry, &ParameterType::user());

    let converted = convert(&user, &ctx, json!("11"))
        .await
        .expect("user should resolve");
    let missing = convert(&user, &ctx, json!("12")).await;

    assert!(matches!(converted, ArgumentValue::User(found) if found.username == "bob"));
    assert_eq!(
        missing,
        Err(ArgumentError::UnresolvedEntity(
            "User specified is not someone the bot can see.".to_owned()
        ))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_converter_joins_user_and_defaults_voice_state(
    registry: ConverterRegistry,
    ctx: Arc<InteractionContext>,
) {
    let member = resolve(&registry, &ParameterType::member());

    let converted = convert(&member, &ctx, json!("10"))
        .await
        .expect("member should resolve");
    let not_member = convert(&member, &ctx, json!("11")).await;

    let ArgumentValue::Member(found) = converted else {
        panic!("expected member, got {converted:?}");
    };
    assert_eq!(found.user.username, "alice");
    assert_eq!(found.display_name(), "Ally");
    assert!(!found.deaf);
    assert!(!found.mute);
    assert_eq!(
        not_member,
        Err(ArgumentError::UnresolvedEntity(
            "User specified is not a member.".to_owned()
        ))
    );
}

#[rstest]
#[case(ParameterType::text_channel(), "20", Ok(()))]
#[case(ParameterType::text_channel(), "21", Err("This is not a text channel."))]
#[case(ParameterType::text_channel(), "22", Err("Channel not in this guild."))]
#[case(ParameterType::category_channel(), "21", Ok(()))]
#[case(ParameterType::category_channel(), "20", Err("This is not a category channel."))]
#[tokio::test(flavor = "multi_thread")]
async fn channel_converters_enforce_guild_and_kind(
    registry: ConverterRegistry,
    ctx: Arc<InteractionContext>,
    #[case] parameter_type: ParameterType,
    #[case] raw: &str,
    #[case] expected: Result<(), &str>,
) {
    let channel = resolve(&registry, &parameter_type);

    let result = convert(&channel, &ctx, json!(raw)).await;

    match expected {
        Ok(()) => assert!(matches!(result, Ok(ArgumentValue::Channel(found)) if found.id.to_string() == raw)),
        Err(message) => assert_eq!(result, Err(ArgumentError::EntityMismatch(message.to_owned()))),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_channel_is_not_in_guild(registry: ConverterRegistry, ctx: Arc<InteractionContext>) {
    let channel = resolve(&registry, &ParameterType::text_channel());

    assert_eq!(
        convert(&channel, &ctx, json!("404")).await,
        Err(ArgumentError::UnresolvedEntity(
            "Channel not in this guild.".to_owned()
        ))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn role_and_mentionable_converters(registry: ConverterRegistry, ctx: Arc<InteractionContext>) {
    let role = resolve(&registry, &ParameterType::role());
    let mentionable = resolve(&registry, &ParameterType::mentionable());

    let converted_role = convert(&role, &ctx, json!("50")).await.expect("role should resolve");
    let reference = convert(&mentionable, &ctx, json!("123456")).await;

    assert!(matches!(converted_role, ArgumentValue::Role(found) if found.name == "mods"));
    assert_eq!(reference, Ok(ArgumentValue::Mentionable(Snowflake::new(123_456))));
}

#[rstest]
fn optional_wrapper_keeps_type_and_drops_requirement(registry: ConverterRegistry) {
    let resolved = resolve(&registry, &ParameterType::optional(ParameterType::role()));

    assert_eq!(resolved.option_type, OptionType::Role);
    assert!(!resolved.required);
}

#[rstest]
fn union_with_none_and_one_branch_is_optional_branch(registry: ConverterRegistry) {
    let resolved = resolve(
        &registry,
        &ParameterType::union([ParameterType::user(), ParameterType::NoneType]),
    );

    assert_eq!(resolved.option_type, OptionType::User);
    assert!(!resolved.required);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn same_type_union_falls_back_to_mentionable(
    registry: ConverterRegistry,
    ctx: Arc<InteractionContext>,
) {
    let resolved = resolve(
        &registry,
        &ParameterType::union([
            ParameterType::member(),
            ParameterType::user(),
            ParameterType::mentionable(),
        ]),
    );

    let member = convert(&resolved, &ctx, json!("10")).await;
    let user = convert(&resolved, &ctx, json!("11")).await;
    let unknown = convert(&resolved, &ctx, json!("77")).await;

    assert_eq!(resolved.option_type, OptionType::User);
    assert!(matches!(member, Ok(ArgumentValue::Member(_))));
    assert!(matches!(user, Ok(ArgumentValue::User(_))));
    assert_eq!(unknown, Ok(ArgumentValue::Mentionable(Snowflake::new(77))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn same_type_union_without_fallback_ends_with_last_branch(
    registry: ConverterRegistry,
    ctx: Arc<InteractionContext>,
) {
    let resolved = resolve(
        &registry,
        &ParameterType::union([ParameterType::member(), ParameterType::user()]),
    );

    let unknown = convert(&resolved, &ctx, json!("77")).await;

    assert_eq!(
        unknown,
        Err(ArgumentError::UnresolvedEntity(
            "User specified is not someone the bot can see.".to_owned()
        ))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn integer_text_union_is_exposed_as_text(
    registry: ConverterRegistry,
    ctx: Arc<InteractionContext>,
) {
    let resolved = resolve(
        &registry,
        &ParameterType::union([ParameterType::text(), ParameterType::integer()]),
    );

    let number = convert(&resolved, &ctx, json!("42")).await;
    let word = convert(&resolved, &ctx, json!("forty-two")).await;

    assert_eq!(resolved.option_type, OptionType::String);
    assert_eq!(number, Ok(ArgumentValue::Integer(42)));
    assert_eq!(word, Ok(ArgumentValue::Text("forty-two".to_owned())));
}

#[rstest]
#[case(ParameterType::union([]), ConstructionError::EmptyUnion)]
#[case(
    ParameterType::union([ParameterType::NoneType, ParameterType::mentionable()]),
    ConstructionError::EmptyUnion
)]
#[case(
    ParameterType::union([ParameterType::text(), ParameterType::text(), ParameterType::mentionable()]),
    ConstructionError::NotIdentifiable(OptionType::String)
)]
#[case(
    ParameterType::union([ParameterType::text(), ParameterType::integer(), ParameterType::mentionable()]),
    ConstructionError::NotIdentifiable(OptionType::String)
)]
#[case(
    ParameterType::union([ParameterType::user(), ParameterType::role()]),
    ConstructionError::UnsupportedFallback("6, 8".to_owned())
)]
#[case(
    ParameterType::variadic(ParameterType::text()),
    ConstructionError::UnsupportedVariadic
)]
#[case(ParameterType::Context, ConstructionError::InvalidContextParameter)]
fn unsupported_shapes_are_rejected(
    registry: ConverterRegistry,
    #[case] parameter_type: ParameterType,
    #[case] expected: ConstructionError,
) {
    let err = registry
        .resolve(&parameter_type)
        .expect_err("resolution should fail");

    assert_eq!(err, expected);
}

#[rstest]
fn bare_none_type_is_unsupported(registry: ConverterRegistry) {
    let err = registry
        .resolve(&ParameterType::NoneType)
        .expect_err("NoneType alone should fail");

    assert!(matches!(err, ConstructionError::UnsupportedShape(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn custom_converter_receives_text_form(
    registry: ConverterRegistry,
    ctx: Arc<InteractionContext>,
) {
    let mut custom = MockCustomConverter::new();
    custom
        .expect_convert()
        .withf(|_, raw| raw == "17")
        .times(1)
        .returning(|_, raw| Ok(ArgumentValue::Custom(json!({ "parsed": raw }))));
    let resolved = resolve(&registry, &ParameterType::custom(Arc::new(custom)));

    let converted = convert(&resolved, &ctx, json!(17)).await;

    assert_eq!(resolved.option_type, OptionType::String);
    assert_eq!(converted, Ok(ArgumentValue::Custom(json!({ "parsed": "17" }))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overridden_converter_is_used(ctx: Arc<InteractionContext>) {
    let mut custom = MockCustomConverter::new();
    custom
        .expect_convert()
        .returning(|_, _| Ok(ArgumentValue::Text("overridden".to_owned())));
    let adapter = Arc::new(crate::command::adapters::converters::CustomConverterAdapter::new(
        Arc::new(custom),
    ));
    let registry = ConverterRegistry::new().with_converter(ArgumentKind::Text, adapter);
    let resolved = resolve(&registry, &ParameterType::text());

    assert_eq!(
        convert(&resolved, &ctx, json!("raw")).await,
        Ok(ArgumentValue::Text("overridden".to_owned()))
    );
}
