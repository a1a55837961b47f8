// Copyright (c) 2024 Alibaba Cloud
//
// SPDX-License-Identifier: Apache-2.0
//

//! Versioned table of TPM 1.2 endorsement key issuers.
//!
//! Entries are only ever appended. Bump [`BUILTIN_ANCHORS_VERSION`] whenever
//! the table changes so consumers can tell which set they were built with.

/// Version of the built-in anchor table.
pub const BUILTIN_ANCHORS_VERSION: u32 = 1;

/// Public exponent of the bare modulus anchors.
pub const BUILTIN_MODULUS_EXPONENT: u32 = 0x10001;

/// TPM vendors with built-in anchors
#[derive(EnumString, AsRefStr, Display, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Manufacturer {
    #[strum(serialize = "STMicroelectronics")]
    StMicro,

    #[strum(serialize = "Nuvoton")]
    Nuvoton,

    #[strum(serialize = "Infineon")]
    Infineon,

    /// Atmel does not publish EK issuing certificates, only keys
    #[strum(serialize = "Atmel")]
    Atmel,

    /// Anchors supplied through configuration or the builder
    #[strum(serialize = "custom")]
    Custom,
}

pub(crate) enum AnchorSource {
    /// PEM encoded issuing certificate
    Pem(&'static str),
    /// Hex encoded 2048-bit modulus
    Modulus(&'static str),
}

pub(crate) struct BuiltinAnchor {
    pub name: &'static str,
    pub manufacturer: Manufacturer,
    pub source: AnchorSource,
}

pub(crate) const BUILTIN_ANCHORS: &[BuiltinAnchor] = &[
    BuiltinAnchor {
        name: "STM1",
        manufacturer: Manufacturer::StMicro,
        source: AnchorSource::Pem(include_str!("anchors/stm1.pem")),
    },
    BuiltinAnchor {
        name: "STM2",
        manufacturer: Manufacturer::StMicro,
        source: AnchorSource::Pem(include_str!("anchors/stm2.pem")),
    },
    BuiltinAnchor {
        name: "NTC1",
        manufacturer: Manufacturer::Nuvoton,
        source: AnchorSource::Pem(include_str!("anchors/ntc1.pem")),
    },
    BuiltinAnchor {
        name: "NTC2",
        manufacturer: Manufacturer::Nuvoton,
        source: AnchorSource::Pem(include_str!("anchors/ntc2.pem")),
    },
    BuiltinAnchor {
        name: "IFX1",
        manufacturer: Manufacturer::Infineon,
        source: AnchorSource::Pem(include_str!("anchors/ifx1.pem")),
    },
    BuiltinAnchor {
        name: "IFX2",
        manufacturer: Manufacturer::Infineon,
        source: AnchorSource::Pem(include_str!("anchors/ifx2.pem")),
    },
    BuiltinAnchor {
        name: "IFX3",
        manufacturer: Manufacturer::Infineon,
        source: AnchorSource::Pem(include_str!("anchors/ifx3.pem")),
    },
    BuiltinAnchor {
        name: "IFX4",
        manufacturer: Manufacturer::Infineon,
        source: AnchorSource::Pem(include_str!("anchors/ifx4.pem")),
    },
    BuiltinAnchor {
        name: "IFX5",
        manufacturer: Manufacturer::Infineon,
        source: AnchorSource::Pem(include_str!("anchors/ifx5.pem")),
    },
    BuiltinAnchor {
        name: "IFX8",
        manufacturer: Manufacturer::Infineon,
        source: AnchorSource::Pem(include_str!("anchors/ifx8.pem")),
    },
    BuiltinAnchor {
        name: "IFX15",
        manufacturer: Manufacturer::Infineon,
        source: AnchorSource::Pem(include_str!("anchors/ifx15.pem")),
    },
    BuiltinAnchor {
        name: "ATM1",
        manufacturer: Manufacturer::Atmel,
        source: AnchorSource::Modulus(
            "e5afb8c97b6e6d49c624fcfb6558d6b291a17b94ebf4186b590f5039f0e85659\
             268beb60d86a9cf6a03d477f5686288498ab90dfee1722f3be5c516b542bfef1\
             8b849c1208bb8e85117d4b046ecb9d425b920015d29cc73163a084b843206706\
             83fea43bd7c7fbb29cc1fc0d6a1f992e47db7e2b37726d3d465386f114aaf0bc\
             8af19734ed01f633b2fff0f1674514393270205bbbee93c87f33ad934f2fb20d\
             5b9697f8e7877beb2a054ca0ec8bfe233711d147215fabfe524e23f1d1025922\
             782446889d64248e2d42951788bfad2b6881d720319ea712433596c6536ebbab\
             00515dad23ea8c54cda8e9e4f57ff30cefe6f89e6cae06b74e20ee5dbd37a4ef",
        ),
    },
    BuiltinAnchor {
        name: "ATM2",
        manufacturer: Manufacturer::Atmel,
        source: AnchorSource::Modulus(
            "e9efe830ccafecd3e534aa3d03b96cc090e4135e0b6464ac2a2472cf225edaa1\
             c2a01c2c644ab7415db0e1db9c9e070ecac45a7330ddf0292ef59df7d9d6e2f5\
             3aba4596a993f78bee670117f5c136eed67eddcf0d14f3b3c829337c451e8e7d\
             f8e02379ac774c4f3247a3e18a2a69e36b88f5fd7ce2f42c830cc458dcfa90c5\
             0fe66c1edc79bdcbc4654f3ae9240b55b56f70ecb9a849e3871e0cec1061bdab\
             91763e463a5f416df5e0d06883a54e87e4487cef1b654bbfc30920d3239d7acf\
             9ef17c76a1b7f25cc022f0df24a2b11393236366a815cd5d7c84900efe2c631d\
             366fa8f07c397ca450abc02cc7edc5a6204d210f6055d8ba6ead44538be92431",
        ),
    },
    BuiltinAnchor {
        name: "ATM3",
        manufacturer: Manufacturer::Atmel,
        source: AnchorSource::Modulus(
            "98501401327ff3121eb855b468a3597300ad0cb0ce4281887b3fac83ae04989f\
             ab10a3477cf423ede7b7531880456a0bbe6accc0c6451d756e1dbe90e905011f\
             63a65197e17015e6f7865b5eb150c83c68b11de553e259bb924ad17efa919010\
             b62048dbf52424cb74c51526d4fee92272a7aa4f47630d87a70ac2619208efc4\
             7637c6df1890173a9cf5a0ea48ee35477b0b4963f82e9f58e05ee3b0356fb5a2\
             e0da52b07ff2df66d25beca1ea9dbaad0d86f97800bea4c55169e2c497de016e\
             48e45c6c53f886eed4309cba839f5d6ec829ba56e5b5ddbe1c3ab111ae153ce7\
             b72250b8894b28d3dd6fabe578f53858399d135c58e4d5d35d71316e2b63bc91",
        ),
    },
    BuiltinAnchor {
        name: "ATM4",
        manufacturer: Manufacturer::Atmel,
        source: AnchorSource::Modulus(
            "c6d975b1a96eff64977aa08632d69cd06302ab1e907a1e0ab6bbe23df19574e6\
             e4b2ec8644f3ee696db9fe860d18b95fdb1fe40e592707679914c896f28b4a5d\
             5fb13b9d2e15cc684c75d9d709cc0fcc7a0a0334cf48f70d0e5dd1ebb9b11443\
             77b187604a6ebcc8f4c7ca6091993e0be531da15a58fcc448840c7f2ae70c8fe\
             405fdd86929a1400bd1ee2f515eff70210172c2ceb3c3aaeab2b39a283cda4b0\
             388bfd39fff13b6c4a6500c13fc5cccfe08bbf71d03d611ed5f22ce14f0c8ace\
             cb7777733e5030e4922c31c68e6a1a0c1174fab701449082536881b5f20c05eb\
             c93b52015268ff1207ab1d659a7f9a4d34900beb678079e6962a6e4e697e9b55",
        ),
    },
    BuiltinAnchor {
        name: "ATM5",
        manufacturer: Manufacturer::Atmel,
        source: AnchorSource::Modulus(
            "aa0d458e1390fc6b2a8142fe59205c7d8af7864c7197510168222a8a895cd51e\
             5399969b687a025082668705df146845be166b23401c12a21800d2e0634ae2be\
             7e21eaf57eaebc2dc4cd57ed7f21993f8076fc4bda9f65382a7b5cda50d91c3e\
             a3fd8986e05252ffa8a56ecaeb03ee9b0529cb880bf9d028cd9c818da9f90a8f\
             6c3f9621de4746dfe7b346c7f17f70a74bbe8d8631e094af4059474cd5cea614\
             6a933fe7d4f72493a6869bae70d4cc871e76ee4eb0c65ae4bd4b78b287aeaadb\
             3376fdf79694f513eb210a0edf1f8149abbd01bd1deb5e33a43d13796c23053e\
             d8e6b220d786c8c7b0e203ee241911397c766da5d496a6026696470e6d249dbd",
        ),
    },
    BuiltinAnchor {
        name: "ATM6",
        manufacturer: Manufacturer::Atmel,
        source: AnchorSource::Modulus(
            "c3db3dca4a60cc7d418abcfc25598773f8d7352685b0341833d85c4b7e75dcfe\
             daad2fabfe6bac994a9f7726d8fc643cf98a8003a219abec65199ed65049b1be\
             8fc79679bf1508f77a96460f7aee0299bef1d2d5e07bece118d9092f1c7e9911\
             672821fa745dad9dda0306518d06e1be5f26009390d91a7d00d699333623adee\
             da764baa2050daf379ca827e1790c21fb7e32d84ebdc318999b522fae20bc035\
             9ecf8abc81d9c3214bed3200c18afceaa6d042c8464f30a8047f977b71455c68\
             404a80f5f064d9bbc63625af6bdd9c87108ba445fdf827195af51e1fa529e5ad\
             840f1c3c060c44d0beacaa320d5a7dae374c7b8e52b2b20f97132a3ba94a4c45",
        ),
    },
    BuiltinAnchor {
        name: "ATM7",
        manufacturer: Manufacturer::Atmel,
        source: AnchorSource::Modulus(
            "95845f0c3ddb30907bc3a165f8a7b3a08684933cfed9509e17cbf7a21b0d9d22\
             8281cc7cba4ed27b2a79d1b12d2c1eaf3b3c2070ce568c522d2b260b65a1ed3f\
             8deade21ecbc84a300635c606710dcdacce226baa5cda0795adaba995d3d3750\
             14e423c1dfb43ff436fd131b598ea0fac6e3203b48b44735be17fa6c8dd38a74\
             fe6c6c715dd47d07aa9680b35cfc7df5c2c04d3769cfbf52b8c04f0c59f015ee\
             170ad8da08735cc6118f888963ed5d2bb8f339af4b6971296598ba21c1c02b79\
             9ecfd4eccf174a391a8fb49b843d36c8ac2231abeeed230071e49658c06e8638\
             26f7fcdf3003ca3bdc1e422c5509eb97b2907279fb1e90fba4e6885b58e4bf6f",
        ),
    },
    BuiltinAnchor {
        name: "ATM8",
        manufacturer: Manufacturer::Atmel,
        source: AnchorSource::Modulus(
            "ca55da838266ce8a9a4caf1e09c4a30d238645cad7f082bf7c16b080458a0203\
             f2ff2bbef051975cad745c3788d5f9a501e7c3afbdf8f429febfdff2f8c7df5c\
             876e282a91e593fd335f9f064ee4e65e31d92782f4d7c8306f9cd3227a9b5904\
             9ac48dd389e52a4f1fa28e782fb0d8f8a9237e1e843f1cb3c6c303aaa4eb3227\
             c14e117692aa392940437418c890e507d5d6cb5868c4814a4aa1c0aed8ce3553\
             b8e68d3a1ab6403e77757e3f2411178fe52644d88afe89cb5665d6aa4490bbd1\
             d2a2abce81e43a28fbcc1a50ff8e81d815b5a4046353b008a7736d7d2e531cbe\
             7d9a95f1a6eca3eb2da1d30c4d55190f6699d50346561e0cfd2784dc22000d3f",
        ),
    },
    BuiltinAnchor {
        name: "ATM9",
        manufacturer: Manufacturer::Atmel,
        source: AnchorSource::Modulus(
            "c5ad170489418fdb796d807cd4279a9a5577237ad36ad860c949f654beffc278\
             36bcae71ec10776b5c235ede64feec11fcce6d7c80ce4a3ba0fd27437d35a465\
             17bcd888ffa1824ecad72b173133a2e219540eedfee29d5f3470cfb759e8b3e7\
             355929f06896503083a5334d9a7be2799723aa87da8c371cd040bbdb4353f8da\
             a690025dd2a60cb3e8b84c0da89b60b62f1a64abe61d269da924e08242ab82c2\
             62d707c3b1add7635f8416e661f38a0c787da9c2fc625c5ee4503d7a8baee1d9\
             956994a94ed297ac99125b88b476c1ae2e01c43dd0ede5c7d2c337ad919408ba\
             f794c3d78c6b1fa688194f8ccbaf4ef9408c6dc1ee4e5299ec954eb5737e1707",
        ),
    },
    BuiltinAnchor {
        name: "ATM10",
        manufacturer: Manufacturer::Atmel,
        source: AnchorSource::Modulus(
            "d4711e0a7f36afc56b83ae21a30bedb3fd988f9cae5e112fec5c146884a8eeb6\
             059c06ecb7231518db0bdb8ade456eda8b28fae621c4a23c7509aaf7265bbc85\
             87d3aa26a016610afea7bc7ab11ab708398c543419d2b76bd4f0ee78586638e9\
             7bdf2c4632ff0d0948e4d88a0a53c5e1936a238d7c3069b398f37f40dc519ca2\
             40af92d313c15908c4a19b957d7a07bbda82e3e157cfbb3dbd7d02c1656240db\
             e354cba802a5c51285e8c67e6f434c6064d26df0aeeab25eeccacc9e14d17a39\
             9d3aa9ed957f24b6d25a74c9c6cef6859e03d676e2d2968f42070ae4561b2304\
             355ae12937940c7e296c01915ba2442741afa35f647395ea1ad265115449c64d",
        ),
    },
    BuiltinAnchor {
        name: "ATM11",
        manufacturer: Manufacturer::Atmel,
        source: AnchorSource::Modulus(
            "aab4b5122d55bcbc5561636ffecdf96989876b930e9ef4326e05bf8b55ee20d6\
             6e3d0a98370d36c2b59103979fb76b6cf859090ef6f3e9e76da87df40a3c7ea6\
             613d3afa2d63b3bbadba2bbb3d96d8fa5c434fe29cb522c4d8aafc0f2088a456\
             25a4cdb2217a54b3445847b9b1fdeb7baf82fd94147f0ba9339e9b53426b20cc\
             44829f1208582e42c37072adadc6daf5ba3817e0f37a0ce7ade8172b4e9b18bf\
             12a140f6cbfd37e5fe432a615ceaab2ac11a0920f3ed854713ba6d54890b0af2\
             ac0dfb670920265de4fea89b4c5cf02557c99c6693e7b2ff4d4549470003b553\
             7ea0915c41a991ecde9522ea21c7b7e9ed4f2df27aca859a48c0ae34e612c4d7",
        ),
    },
    BuiltinAnchor {
        name: "ATM12",
        manufacturer: Manufacturer::Atmel,
        source: AnchorSource::Modulus(
            "d51e1f5416d423bb6c691b92d15bc74e2a2e67b2ff1c0a241c8b28cde2ca6a68\
             acb67a0234a332cf8d29c067a72bc9745e7bc9bdea00953fb7b5b2a699ea3b89\
             1d503f6f2c84df2082739b1d9a4137670f8b24a1d00f2e608117637b0932b359\
             fe1d8c31b8d80f69d4cab795a6e8fe9b2b526ef981d5ea9c8fda782416356aac\
             1706b9b40eac595c9b1534192327b73d905cb7cdef3271c4c52b1ff05deeef3c\
             782858a03b44bb4cda2fe9a49750813fc8b9b3ab8594f258fa6f2d00e935fd29\
             fd20e6072c37fd1ce29cf165c54980781cef4c3c0cee312c6485101836480618\
             9f2b8e552cbad08834d338bf1e570f43f07d339fc009bbb705f70f686108fa7d",
        ),
    },
    BuiltinAnchor {
        name: "ATM13",
        manufacturer: Manufacturer::Atmel,
        source: AnchorSource::Modulus(
            "c12bd4cd44118c3dcac99309bb9099b0754ba803749814fcea78af8c257e4611\
             ec474b92535d7434a8dbd881d73377d8689960bd945301027773c8cf7346d5b4\
             2d3ee76d5028ab7ce8e2e2d3e9eb353d90ccbb6b260c7a791a188aef6c7b6174\
             bbfcc1f8f1d0d11f2a54e235c70d161552b6c36fa6453dd637851da74467e8b2\
             8f4570aae7d24f7ee0fb84d0559b0a7dbb38f64cba7c96331149b0a14637a4bb\
             d1f81be6f6a9ae307f683d479fc4aaae5c33062c0f8df9edcba195fa964310fa\
             d49f77ae8d877f9fb7d09ad9176ca8fd35f9a1c750aa7bcb79aa5ed4a6464c3a\
             e290d5c3f5e221479df24f868100afd107cb1cb1bc239f9b67a0804ed06004c3",
        ),
    },
];
