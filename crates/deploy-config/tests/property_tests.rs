use deploy_config::{DeployConfig, codec, validate};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

fn arb_config() -> impl Strategy<Value = DeployConfig> {
    (
        "app-[a-z0-9]{1,12}",
        prop_oneof![Just("refs/heads/main".to_string()), "refs/tags/v[0-9]\\.[0-9]"],
        prop_oneof![Just(".".to_string()), "deploy/[a-z]{1,8}"],
        vec("[a-z-]{1,12}\\.ya?ml", 1..4),
        any::<(bool, bool, bool)>(),
        0u64..10_000,
        btree_map("[A-Z]{1,3}_[A-Z]{1,4}", "v[0-9]{1,4}", 0..4),
        any::<(bool, bool, bool)>(),
        any::<u32>(),
    )
        .prop_map(
            |(name, reference, dir, files, flags, timeout, args, build_flags, memory)| {
                let mut config = DeployConfig::default_for(name);
                config.reference = reference;
                config.working_directory = dir;
                config.compose_files = files;
                (config.remove_orphans, config.force_recreate, config.force_image_pull) = flags;
                config.timeout = timeout;
                config.build_opts.args = args;
                (
                    config.build_opts.force_image_pull,
                    config.build_opts.quiet,
                    config.build_opts.no_cache,
                ) = build_flags;
                config.build_opts.memory_limit = u64::from(memory);
                config
            },
        )
}

proptest! {
    #[test]
    fn test_decode_is_idempotent(config in arb_config()) {
        let first = codec::decode(codec::encode(&config).unwrap().as_bytes()).unwrap();
        let second = codec::decode(codec::encode(&first).unwrap().as_bytes()).unwrap();
        prop_assert_eq!(&first, &config);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_name_only_documents_equal_default_for(name in "app-[a-z0-9]{1,12}") {
        let doc = format!("name: {name}\n");
        let config = codec::decode(doc.as_bytes()).unwrap();
        prop_assert!(validate(&config).is_ok());
        prop_assert_eq!(config, DeployConfig::default_for(name));
    }
}
