//! Built-in Kryptos corpus
//!
//! Used for any corpus section the configuration leaves out. Spaces mark the
//! sculpture's line breaks and are dropped by normalization.

pub const PRIMARY_KEY: &str = "KRYPTOS";

pub const PRUNE: &[&str] = &["ABSCISSA", "PALIMPSEST"];

pub const CIPHERTEXTS: &[(&str, &str)] = &[
    (
        "K1",
        "EMUFPHZLRFAXYUSDJKZLDKRNSHGNFIVJ YQTQUXQBQVYUVLLTREVJYQTMKYRDMFD",
    ),
    (
        "K2",
        "VFPJUDEEHZWETZYVGWHKKQETGFQJNCE GGWHKK?DQMCPFQZDQMMIAGPFXHQRLG \
         TIMVMZJANQLVKQEDAGDVFRPJUNGEUNA QZGZLECGYUXUEENJTBJLBQCRTBJDFHRR \
         YIZETKZEMVDUFKSJHKFWHKUWQLSZFTI HHDDDUVH?DWKBFUFPWNTDFIYCUQZERE \
         EVLDKFEZMOQQJLTTUGSYQPFEUNLAVIDX FLGGTEZ?FKZBSFDQVGOGIPUFXHHDRKF \
         FHQNTGPUAECNUVPDJMQCLQUMUNEDFQ ELZZVRRGKFFVOEEXBDMVPNFQXEZLGRE \
         DNQFMPNZGLFLPMRJQYALMGNUVPDXVKP DQUMEBEDMHDAFMJGZNUPLGEWJLLAETG",
    ),
    (
        "K3",
        "ENDYAHROHNLSRHEOCPTEOIBIDYSHNAIA CHTNREYULDSLLSLLNOHSNOSMRWXMNE \
         TPRNGATIHNRARPESLNNELEBLPIIACAE WMTWNDITEENRAHCTENEUDRETNHAEOE \
         TFOLSEDTIWENHAEIOYTEYQHEENCTAYCR EIFTBRSPAMHHEWENATAMATEGYEERLB \
         TEEFOASFIOTUETUAEOTOARMAEERTNRTI BSEDDNIAAHTTMSTEWPIEROAGRIEWFEB \
         AECTDDHILCEIHSITEGOEAOSDDRYDLORIT RKLMLEHAGTDHARDPNEOHMGFMFEUHE \
         ECDMRIPFEIMEHNLSSTTRTVDOHW?",
    ),
    (
        "K4",
        "OBKR UOXOGHULBSOLIFBBWFLRVQQPRNGKSSO TWTQSJQSSEKZZWATJKLUDIAWINFBNYP \
         VTTMZFPKWGDKZXTJCDIGKUHUAUEKCAR",
    ),
];

pub const CRIBS: &[&str] = &[
    "HANDCORNERAND",
    "KNOWSTHEEXACT",
    "LIESTHENUANCE",
    "THEDOORWAYWAS",
    "THEROOMWITHIN",
    "USEDTHEEARTHS",
    "WESTXLAYERTWO",
    "YOURPOSITIONE",
];

pub const PLAINTEXTS: &[(&str, &str)] = &[
    (
        "K0",
        "EEVIRTUALLYEEEEEEEINVISIBLEDIGETALEEEINTERPRETATITEESHADOWEEFORCESEEEEE\
         LUCIDEEEMEMORYETISYOURPOSITIONESOSRQ",
    ),
    (
        "K1_plain",
        "BETWEENSUBTLESHADINGANDTHEABSENCEOFLIGHTLIESTHENUANCEOFIQLUSION",
    ),
    (
        "K2_plain",
        "ITWASTOTALLYINVISIBLEHOWSTHATPOSSIBLETHEYUSEDTHEEARTHSMAGNETICFIELD\
         THEINFORMATIONWASGATHEREDANDTRANSMITTEDUNDERGRUUNDTOANUNKNOWNLOCATION\
         DOESLANGLEYKNOWABOUTTHISTHEYSHOULDITSBURIEDOUTTHERESOMEWHEREWHOKNOWS\
         THEEXACTLOCATIONONLYWWTHISWASHISLASTMESSAGETHIRTYEIGHTDEGREESFIFTYSEVEN\
         MINUTESSIPOINTFIVESECONDSNORTHSEVENTYSEVENDEGREESEIGHTMINUTESFORTYFOUR\
         SECONDSWESTLAYERTWO",
    ),
    (
        "K3_plain",
        "SLOWLYDESPARATLYSLOWLYTHEREMAINSOFPASSAGEDEBRISTHATENCUMBEREDTHELOWER\
         PARTOFTHEDOORWAYWASREMOVEDWITHTREMBLINGHANDSIMADEATINYBREACHINTHEUPPER\
         LEFTHANDCORNERANDTHENWIDENINGTHEHOLEALITTLEIINSERTEDTHECANDLEANDPEERED\
         INTHEHOTAIRESCAPINGFROMTHECHAMBERCAUSEDTHEFLAMETOFLICKERBUTPRESENTLY\
         DETAILSOFTHEROOMWITHINEMERGEDFROMTHEMISTCANYOUSEEANYTHINGQ",
    ),
];

/// The row inspector's default demonstration: K2's opening alignment.
pub const ROW_DEMO: (&str, &str, &str) = ("K2", "ALLYINVISIBLE", "ABSCISSA");
