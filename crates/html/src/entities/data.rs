//! Named character reference tables.
//!
//! Names are stored without the trailing `;`. Every name is matched with a
//! terminating semicolon; names listed in [`LEGACY`] additionally match
//! without one.

/// HTML named references: every HTML 4 name plus a commonly used subset of
/// the living-standard additions.
pub(crate) static HTML: &[(&str, &str)] = &[
    // Markup-significant and ASCII punctuation.
    ("AMP", "&"),
    ("COPY", "\u{A9}"),
    ("GT", ">"),
    ("LT", "<"),
    ("QUOT", "\""),
    ("REG", "\u{AE}"),
    ("TRADE", "\u{2122}"),
    ("Tab", "\t"),
    ("NewLine", "\n"),
    ("excl", "!"),
    ("quot", "\""),
    ("num", "#"),
    ("dollar", "$"),
    ("percnt", "%"),
    ("amp", "&"),
    ("apos", "'"),
    ("lpar", "("),
    ("rpar", ")"),
    ("ast", "*"),
    ("midast", "*"),
    ("plus", "+"),
    ("comma", ","),
    ("period", "."),
    ("sol", "/"),
    ("colon", ":"),
    ("semi", ";"),
    ("lt", "<"),
    ("equals", "="),
    ("gt", ">"),
    ("quest", "?"),
    ("commat", "@"),
    ("lsqb", "["),
    ("lbrack", "["),
    ("bsol", "\\"),
    ("rsqb", "]"),
    ("rbrack", "]"),
    ("Hat", "^"),
    ("lowbar", "_"),
    ("UnderBar", "_"),
    ("grave", "`"),
    ("DiacriticalGrave", "`"),
    ("fjlig", "fj"),
    ("lcub", "{"),
    ("lbrace", "{"),
    ("verbar", "|"),
    ("vert", "|"),
    ("VerticalLine", "|"),
    ("rcub", "}"),
    ("rbrace", "}"),
    // Latin-1 supplement.
    ("nbsp", "\u{A0}"),
    ("NonBreakingSpace", "\u{A0}"),
    ("iexcl", "\u{A1}"),
    ("cent", "\u{A2}"),
    ("pound", "\u{A3}"),
    ("curren", "\u{A4}"),
    ("yen", "\u{A5}"),
    ("brvbar", "\u{A6}"),
    ("sect", "\u{A7}"),
    ("uml", "\u{A8}"),
    ("Dot", "\u{A8}"),
    ("die", "\u{A8}"),
    ("copy", "\u{A9}"),
    ("ordf", "\u{AA}"),
    ("laquo", "\u{AB}"),
    ("not", "\u{AC}"),
    ("shy", "\u{AD}"),
    ("reg", "\u{AE}"),
    ("circledR", "\u{AE}"),
    ("macr", "\u{AF}"),
    ("strns", "\u{AF}"),
    ("deg", "\u{B0}"),
    ("plusmn", "\u{B1}"),
    ("pm", "\u{B1}"),
    ("PlusMinus", "\u{B1}"),
    ("sup2", "\u{B2}"),
    ("sup3", "\u{B3}"),
    ("acute", "\u{B4}"),
    ("DiacriticalAcute", "\u{B4}"),
    ("micro", "\u{B5}"),
    ("para", "\u{B6}"),
    ("middot", "\u{B7}"),
    ("centerdot", "\u{B7}"),
    ("CenterDot", "\u{B7}"),
    ("cedil", "\u{B8}"),
    ("Cedilla", "\u{B8}"),
    ("sup1", "\u{B9}"),
    ("ordm", "\u{BA}"),
    ("raquo", "\u{BB}"),
    ("frac14", "\u{BC}"),
    ("frac12", "\u{BD}"),
    ("half", "\u{BD}"),
    ("frac34", "\u{BE}"),
    ("iquest", "\u{BF}"),
    ("Agrave", "\u{C0}"),
    ("Aacute", "\u{C1}"),
    ("Acirc", "\u{C2}"),
    ("Atilde", "\u{C3}"),
    ("Auml", "\u{C4}"),
    ("Aring", "\u{C5}"),
    ("angst", "\u{C5}"),
    ("AElig", "\u{C6}"),
    ("Ccedil", "\u{C7}"),
    ("Egrave", "\u{C8}"),
    ("Eacute", "\u{C9}"),
    ("Ecirc", "\u{CA}"),
    ("Euml", "\u{CB}"),
    ("Igrave", "\u{CC}"),
    ("Iacute", "\u{CD}"),
    ("Icirc", "\u{CE}"),
    ("Iuml", "\u{CF}"),
    ("ETH", "\u{D0}"),
    ("Ntilde", "\u{D1}"),
    ("Ograve", "\u{D2}"),
    ("Oacute", "\u{D3}"),
    ("Ocirc", "\u{D4}"),
    ("Otilde", "\u{D5}"),
    ("Ouml", "\u{D6}"),
    ("times", "\u{D7}"),
    ("Oslash", "\u{D8}"),
    ("Ugrave", "\u{D9}"),
    ("Uacute", "\u{DA}"),
    ("Ucirc", "\u{DB}"),
    ("Uuml", "\u{DC}"),
    ("Yacute", "\u{DD}"),
    ("THORN", "\u{DE}"),
    ("szlig", "\u{DF}"),
    ("agrave", "\u{E0}"),
    ("aacute", "\u{E1}"),
    ("acirc", "\u{E2}"),
    ("atilde", "\u{E3}"),
    ("auml", "\u{E4}"),
    ("aring", "\u{E5}"),
    ("aelig", "\u{E6}"),
    ("ccedil", "\u{E7}"),
    ("egrave", "\u{E8}"),
    ("eacute", "\u{E9}"),
    ("ecirc", "\u{EA}"),
    ("euml", "\u{EB}"),
    ("igrave", "\u{EC}"),
    ("iacute", "\u{ED}"),
    ("icirc", "\u{EE}"),
    ("iuml", "\u{EF}"),
    ("eth", "\u{F0}"),
    ("ntilde", "\u{F1}"),
    ("ograve", "\u{F2}"),
    ("oacute", "\u{F3}"),
    ("ocirc", "\u{F4}"),
    ("otilde", "\u{F5}"),
    ("ouml", "\u{F6}"),
    ("divide", "\u{F7}"),
    ("div", "\u{F7}"),
    ("oslash", "\u{F8}"),
    ("ugrave", "\u{F9}"),
    ("uacute", "\u{FA}"),
    ("ucirc", "\u{FB}"),
    ("uuml", "\u{FC}"),
    ("yacute", "\u{FD}"),
    ("thorn", "\u{FE}"),
    ("yuml", "\u{FF}"),
    // Latin extended and spacing modifiers.
    ("OElig", "\u{152}"),
    ("oelig", "\u{153}"),
    ("Scaron", "\u{160}"),
    ("scaron", "\u{161}"),
    ("Yuml", "\u{178}"),
    ("fnof", "\u{192}"),
    ("circ", "\u{2C6}"),
    ("tilde", "\u{2DC}"),
    ("DiacriticalTilde", "\u{2DC}"),
    // Greek.
    ("Alpha", "\u{391}"),
    ("Beta", "\u{392}"),
    ("Gamma", "\u{393}"),
    ("Delta", "\u{394}"),
    ("Epsilon", "\u{395}"),
    ("Zeta", "\u{396}"),
    ("Eta", "\u{397}"),
    ("Theta", "\u{398}"),
    ("Iota", "\u{399}"),
    ("Kappa", "\u{39A}"),
    ("Lambda", "\u{39B}"),
    ("Mu", "\u{39C}"),
    ("Nu", "\u{39D}"),
    ("Xi", "\u{39E}"),
    ("Omicron", "\u{39F}"),
    ("Pi", "\u{3A0}"),
    ("Rho", "\u{3A1}"),
    ("Sigma", "\u{3A3}"),
    ("Tau", "\u{3A4}"),
    ("Upsilon", "\u{3A5}"),
    ("Phi", "\u{3A6}"),
    ("Chi", "\u{3A7}"),
    ("Psi", "\u{3A8}"),
    ("Omega", "\u{3A9}"),
    ("ohm", "\u{3A9}"),
    ("alpha", "\u{3B1}"),
    ("beta", "\u{3B2}"),
    ("gamma", "\u{3B3}"),
    ("delta", "\u{3B4}"),
    ("epsilon", "\u{3B5}"),
    ("epsi", "\u{3B5}"),
    ("zeta", "\u{3B6}"),
    ("eta", "\u{3B7}"),
    ("theta", "\u{3B8}"),
    ("iota", "\u{3B9}"),
    ("kappa", "\u{3BA}"),
    ("lambda", "\u{3BB}"),
    ("mu", "\u{3BC}"),
    ("nu", "\u{3BD}"),
    ("xi", "\u{3BE}"),
    ("omicron", "\u{3BF}"),
    ("pi", "\u{3C0}"),
    ("rho", "\u{3C1}"),
    ("sigmaf", "\u{3C2}"),
    ("sigmav", "\u{3C2}"),
    ("sigma", "\u{3C3}"),
    ("tau", "\u{3C4}"),
    ("upsilon", "\u{3C5}"),
    ("upsi", "\u{3C5}"),
    ("phi", "\u{3C6}"),
    ("chi", "\u{3C7}"),
    ("psi", "\u{3C8}"),
    ("omega", "\u{3C9}"),
    ("thetasym", "\u{3D1}"),
    ("thetav", "\u{3D1}"),
    ("upsih", "\u{3D2}"),
    ("piv", "\u{3D6}"),
    ("varpi", "\u{3D6}"),
    // General punctuation.
    ("ensp", "\u{2002}"),
    ("emsp", "\u{2003}"),
    ("emsp13", "\u{2004}"),
    ("emsp14", "\u{2005}"),
    ("numsp", "\u{2007}"),
    ("puncsp", "\u{2008}"),
    ("thinsp", "\u{2009}"),
    ("ThinSpace", "\u{2009}"),
    ("hairsp", "\u{200A}"),
    ("VeryThinSpace", "\u{200A}"),
    ("ZeroWidthSpace", "\u{200B}"),
    ("zwnj", "\u{200C}"),
    ("zwj", "\u{200D}"),
    ("lrm", "\u{200E}"),
    ("rlm", "\u{200F}"),
    ("hyphen", "\u{2010}"),
    ("dash", "\u{2010}"),
    ("ndash", "\u{2013}"),
    ("mdash", "\u{2014}"),
    ("horbar", "\u{2015}"),
    ("Verbar", "\u{2016}"),
    ("Vert", "\u{2016}"),
    ("lsquo", "\u{2018}"),
    ("OpenCurlyQuote", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("rsquor", "\u{2019}"),
    ("CloseCurlyQuote", "\u{2019}"),
    ("sbquo", "\u{201A}"),
    ("lsquor", "\u{201A}"),
    ("ldquo", "\u{201C}"),
    ("OpenCurlyDoubleQuote", "\u{201C}"),
    ("rdquo", "\u{201D}"),
    ("rdquor", "\u{201D}"),
    ("CloseCurlyDoubleQuote", "\u{201D}"),
    ("bdquo", "\u{201E}"),
    ("ldquor", "\u{201E}"),
    ("dagger", "\u{2020}"),
    ("Dagger", "\u{2021}"),
    ("ddagger", "\u{2021}"),
    ("bull", "\u{2022}"),
    ("bullet", "\u{2022}"),
    ("nldr", "\u{2025}"),
    ("hellip", "\u{2026}"),
    ("mldr", "\u{2026}"),
    ("permil", "\u{2030}"),
    ("pertenk", "\u{2031}"),
    ("prime", "\u{2032}"),
    ("Prime", "\u{2033}"),
    ("tprime", "\u{2034}"),
    ("bprime", "\u{2035}"),
    ("backprime", "\u{2035}"),
    ("lsaquo", "\u{2039}"),
    ("rsaquo", "\u{203A}"),
    ("oline", "\u{203E}"),
    ("OverBar", "\u{203E}"),
    ("caret", "\u{2041}"),
    ("frasl", "\u{2044}"),
    ("bsemi", "\u{204F}"),
    ("qprime", "\u{2057}"),
    ("MediumSpace", "\u{205F}"),
    ("ThickSpace", "\u{205F}\u{200A}"),
    ("NoBreak", "\u{2060}"),
    ("euro", "\u{20AC}"),
    // Letterlike symbols.
    ("Copf", "\u{2102}"),
    ("complexes", "\u{2102}"),
    ("incare", "\u{2105}"),
    ("planck", "\u{210F}"),
    ("hbar", "\u{210F}"),
    ("image", "\u{2111}"),
    ("Im", "\u{2111}"),
    ("ell", "\u{2113}"),
    ("Nopf", "\u{2115}"),
    ("naturals", "\u{2115}"),
    ("numero", "\u{2116}"),
    ("copysr", "\u{2117}"),
    ("weierp", "\u{2118}"),
    ("wp", "\u{2118}"),
    ("Popf", "\u{2119}"),
    ("primes", "\u{2119}"),
    ("Qopf", "\u{211A}"),
    ("rationals", "\u{211A}"),
    ("real", "\u{211C}"),
    ("Re", "\u{211C}"),
    ("Ropf", "\u{211D}"),
    ("reals", "\u{211D}"),
    ("rx", "\u{211E}"),
    ("trade", "\u{2122}"),
    ("Zopf", "\u{2124}"),
    ("integers", "\u{2124}"),
    ("mho", "\u{2127}"),
    ("Zfr", "\u{2128}"),
    ("Cfr", "\u{212D}"),
    ("alefsym", "\u{2135}"),
    ("aleph", "\u{2135}"),
    ("beth", "\u{2136}"),
    ("dd", "\u{2146}"),
    ("ee", "\u{2147}"),
    ("ii", "\u{2148}"),
    ("frac13", "\u{2153}"),
    ("frac23", "\u{2154}"),
    ("frac15", "\u{2155}"),
    ("frac25", "\u{2156}"),
    ("frac35", "\u{2157}"),
    ("frac45", "\u{2158}"),
    ("frac16", "\u{2159}"),
    ("frac56", "\u{215A}"),
    ("frac18", "\u{215B}"),
    ("frac38", "\u{215C}"),
    ("frac58", "\u{215D}"),
    ("frac78", "\u{215E}"),
    // Arrows.
    ("larr", "\u{2190}"),
    ("leftarrow", "\u{2190}"),
    ("LeftArrow", "\u{2190}"),
    ("uarr", "\u{2191}"),
    ("uparrow", "\u{2191}"),
    ("UpArrow", "\u{2191}"),
    ("rarr", "\u{2192}"),
    ("rightarrow", "\u{2192}"),
    ("RightArrow", "\u{2192}"),
    ("darr", "\u{2193}"),
    ("downarrow", "\u{2193}"),
    ("DownArrow", "\u{2193}"),
    ("harr", "\u{2194}"),
    ("leftrightarrow", "\u{2194}"),
    ("LeftRightArrow", "\u{2194}"),
    ("varr", "\u{2195}"),
    ("nwarr", "\u{2196}"),
    ("nearr", "\u{2197}"),
    ("searr", "\u{2198}"),
    ("swarr", "\u{2199}"),
    ("crarr", "\u{21B5}"),
    ("lArr", "\u{21D0}"),
    ("Leftarrow", "\u{21D0}"),
    ("uArr", "\u{21D1}"),
    ("Uparrow", "\u{21D1}"),
    ("rArr", "\u{21D2}"),
    ("Rightarrow", "\u{21D2}"),
    ("Implies", "\u{21D2}"),
    ("dArr", "\u{21D3}"),
    ("Downarrow", "\u{21D3}"),
    ("hArr", "\u{21D4}"),
    ("iff", "\u{21D4}"),
    ("Leftrightarrow", "\u{21D4}"),
    // Mathematical operators.
    ("forall", "\u{2200}"),
    ("ForAll", "\u{2200}"),
    ("comp", "\u{2201}"),
    ("part", "\u{2202}"),
    ("PartialD", "\u{2202}"),
    ("exist", "\u{2203}"),
    ("Exists", "\u{2203}"),
    ("nexist", "\u{2204}"),
    ("empty", "\u{2205}"),
    ("emptyset", "\u{2205}"),
    ("nabla", "\u{2207}"),
    ("Del", "\u{2207}"),
    ("isin", "\u{2208}"),
    ("in", "\u{2208}"),
    ("Element", "\u{2208}"),
    ("notin", "\u{2209}"),
    ("NotElement", "\u{2209}"),
    ("ni", "\u{220B}"),
    ("niv", "\u{220B}"),
    ("notni", "\u{220C}"),
    ("prod", "\u{220F}"),
    ("Product", "\u{220F}"),
    ("coprod", "\u{2210}"),
    ("sum", "\u{2211}"),
    ("Sum", "\u{2211}"),
    ("minus", "\u{2212}"),
    ("mnplus", "\u{2213}"),
    ("mp", "\u{2213}"),
    ("plusdo", "\u{2214}"),
    ("setminus", "\u{2216}"),
    ("lowast", "\u{2217}"),
    ("compfn", "\u{2218}"),
    ("radic", "\u{221A}"),
    ("Sqrt", "\u{221A}"),
    ("prop", "\u{221D}"),
    ("propto", "\u{221D}"),
    ("infin", "\u{221E}"),
    ("ang", "\u{2220}"),
    ("angle", "\u{2220}"),
    ("mid", "\u{2223}"),
    ("nmid", "\u{2224}"),
    ("par", "\u{2225}"),
    ("parallel", "\u{2225}"),
    ("npar", "\u{2226}"),
    ("and", "\u{2227}"),
    ("wedge", "\u{2227}"),
    ("or", "\u{2228}"),
    ("vee", "\u{2228}"),
    ("cap", "\u{2229}"),
    ("cup", "\u{222A}"),
    ("int", "\u{222B}"),
    ("Integral", "\u{222B}"),
    ("Int", "\u{222C}"),
    ("tint", "\u{222D}"),
    ("conint", "\u{222E}"),
    ("oint", "\u{222E}"),
    ("there4", "\u{2234}"),
    ("therefore", "\u{2234}"),
    ("Therefore", "\u{2234}"),
    ("becaus", "\u{2235}"),
    ("because", "\u{2235}"),
    ("Because", "\u{2235}"),
    ("ratio", "\u{2236}"),
    ("Colon", "\u{2237}"),
    ("Proportion", "\u{2237}"),
    ("sim", "\u{223C}"),
    ("Tilde", "\u{223C}"),
    ("bsim", "\u{223D}"),
    ("wreath", "\u{2240}"),
    ("nsim", "\u{2241}"),
    ("esim", "\u{2242}"),
    ("nesim", "\u{2242}\u{338}"),
    ("NotEqualTilde", "\u{2242}\u{338}"),
    ("sime", "\u{2243}"),
    ("simeq", "\u{2243}"),
    ("cong", "\u{2245}"),
    ("TildeFullEqual", "\u{2245}"),
    ("ncong", "\u{2247}"),
    ("asymp", "\u{2248}"),
    ("ap", "\u{2248}"),
    ("approx", "\u{2248}"),
    ("TildeTilde", "\u{2248}"),
    ("nap", "\u{2249}"),
    ("ape", "\u{224A}"),
    ("bump", "\u{224E}"),
    ("bumpe", "\u{224F}"),
    ("doteq", "\u{2250}"),
    ("ne", "\u{2260}"),
    ("NotEqual", "\u{2260}"),
    ("bne", "=\u{20E5}"),
    ("equiv", "\u{2261}"),
    ("Congruent", "\u{2261}"),
    ("nequiv", "\u{2262}"),
    ("le", "\u{2264}"),
    ("leq", "\u{2264}"),
    ("ge", "\u{2265}"),
    ("geq", "\u{2265}"),
    ("GreaterEqual", "\u{2265}"),
    ("lE", "\u{2266}"),
    ("gE", "\u{2267}"),
    ("ll", "\u{226A}"),
    ("Lt", "\u{226A}"),
    ("gg", "\u{226B}"),
    ("Gt", "\u{226B}"),
    ("nlt", "\u{226E}"),
    ("nless", "\u{226E}"),
    ("ngt", "\u{226F}"),
    ("ngtr", "\u{226F}"),
    ("nle", "\u{2270}"),
    ("nge", "\u{2271}"),
    ("lsim", "\u{2272}"),
    ("gsim", "\u{2273}"),
    ("lg", "\u{2276}"),
    ("gl", "\u{2277}"),
    ("pr", "\u{227A}"),
    ("prec", "\u{227A}"),
    ("sc", "\u{227B}"),
    ("succ", "\u{227B}"),
    ("sub", "\u{2282}"),
    ("subset", "\u{2282}"),
    ("sup", "\u{2283}"),
    ("supset", "\u{2283}"),
    ("Superset", "\u{2283}"),
    ("nsub", "\u{2284}"),
    ("nsup", "\u{2285}"),
    ("sube", "\u{2286}"),
    ("subseteq", "\u{2286}"),
    ("SubsetEqual", "\u{2286}"),
    ("supe", "\u{2287}"),
    ("supseteq", "\u{2287}"),
    ("SupersetEqual", "\u{2287}"),
    ("nsube", "\u{2288}"),
    ("nsupe", "\u{2289}"),
    ("uplus", "\u{228E}"),
    ("UnionPlus", "\u{228E}"),
    ("sqsub", "\u{228F}"),
    ("sqsup", "\u{2290}"),
    ("sqsube", "\u{2291}"),
    ("sqsupe", "\u{2292}"),
    ("sqcap", "\u{2293}"),
    ("sqcup", "\u{2294}"),
    ("oplus", "\u{2295}"),
    ("CirclePlus", "\u{2295}"),
    ("ominus", "\u{2296}"),
    ("CircleMinus", "\u{2296}"),
    ("otimes", "\u{2297}"),
    ("CircleTimes", "\u{2297}"),
    ("osol", "\u{2298}"),
    ("odot", "\u{2299}"),
    ("CircleDot", "\u{2299}"),
    ("vdash", "\u{22A2}"),
    ("dashv", "\u{22A3}"),
    ("top", "\u{22A4}"),
    ("DownTee", "\u{22A4}"),
    ("perp", "\u{22A5}"),
    ("bottom", "\u{22A5}"),
    ("bot", "\u{22A5}"),
    ("UpTee", "\u{22A5}"),
    ("models", "\u{22A7}"),
    ("vDash", "\u{22A8}"),
    ("Vdash", "\u{22A9}"),
    ("xwedge", "\u{22C0}"),
    ("Wedge", "\u{22C0}"),
    ("xvee", "\u{22C1}"),
    ("Vee", "\u{22C1}"),
    ("xcap", "\u{22C2}"),
    ("Intersection", "\u{22C2}"),
    ("xcup", "\u{22C3}"),
    ("Union", "\u{22C3}"),
    ("diam", "\u{22C4}"),
    ("diamond", "\u{22C4}"),
    ("Diamond", "\u{22C4}"),
    ("sdot", "\u{22C5}"),
    ("sstarf", "\u{22C6}"),
    ("Star", "\u{22C6}"),
    ("divonx", "\u{22C7}"),
    ("bowtie", "\u{22C8}"),
    ("ctdot", "\u{22EF}"),
    ("vellip", "\u{22EE}"),
    // Miscellaneous technical.
    ("lceil", "\u{2308}"),
    ("LeftCeiling", "\u{2308}"),
    ("rceil", "\u{2309}"),
    ("RightCeiling", "\u{2309}"),
    ("lfloor", "\u{230A}"),
    ("LeftFloor", "\u{230A}"),
    ("rfloor", "\u{230B}"),
    ("RightFloor", "\u{230B}"),
    ("lang", "\u{27E8}"),
    ("langle", "\u{27E8}"),
    ("LeftAngleBracket", "\u{27E8}"),
    ("rang", "\u{27E9}"),
    ("rangle", "\u{27E9}"),
    ("RightAngleBracket", "\u{27E9}"),
    ("telrec", "\u{2315}"),
    ("target", "\u{2316}"),
    ("ulcorn", "\u{231C}"),
    ("urcorn", "\u{231D}"),
    ("dlcorn", "\u{231E}"),
    ("drcorn", "\u{231F}"),
    ("frown", "\u{2322}"),
    ("smile", "\u{2323}"),
    ("cylcty", "\u{232D}"),
    ("profalar", "\u{232E}"),
    ("topbot", "\u{2336}"),
    ("ovbar", "\u{233D}"),
    ("solbar", "\u{233F}"),
    ("angzarr", "\u{237C}"),
    ("lmoust", "\u{23B0}"),
    ("rmoust", "\u{23B1}"),
    ("tbrk", "\u{23B4}"),
    ("bbrk", "\u{23B5}"),
    ("OverParenthesis", "\u{23DC}"),
    ("UnderParenthesis", "\u{23DD}"),
    ("OverBrace", "\u{23DE}"),
    ("UnderBrace", "\u{23DF}"),
    // Box drawing, blocks and geometric shapes.
    ("boxh", "\u{2500}"),
    ("HorizontalLine", "\u{2500}"),
    ("boxv", "\u{2502}"),
    ("boxdr", "\u{250C}"),
    ("boxdl", "\u{2510}"),
    ("boxur", "\u{2514}"),
    ("boxul", "\u{2518}"),
    ("boxvr", "\u{251C}"),
    ("boxvl", "\u{2524}"),
    ("boxhd", "\u{252C}"),
    ("boxhu", "\u{2534}"),
    ("boxvh", "\u{253C}"),
    ("boxH", "\u{2550}"),
    ("boxV", "\u{2551}"),
    ("uhblk", "\u{2580}"),
    ("lhblk", "\u{2584}"),
    ("block", "\u{2588}"),
    ("blk14", "\u{2591}"),
    ("blk12", "\u{2592}"),
    ("blk34", "\u{2593}"),
    ("squ", "\u{25A1}"),
    ("square", "\u{25A1}"),
    ("Square", "\u{25A1}"),
    ("squf", "\u{25AA}"),
    ("squarf", "\u{25AA}"),
    ("blacksquare", "\u{25AA}"),
    ("rect", "\u{25AD}"),
    ("marker", "\u{25AE}"),
    ("xutri", "\u{25B3}"),
    ("bigtriangleup", "\u{25B3}"),
    ("utrif", "\u{25B4}"),
    ("utri", "\u{25B5}"),
    ("rtrif", "\u{25B8}"),
    ("rtri", "\u{25B9}"),
    ("xdtri", "\u{25BD}"),
    ("dtrif", "\u{25BE}"),
    ("dtri", "\u{25BF}"),
    ("ltrif", "\u{25C2}"),
    ("ltri", "\u{25C3}"),
    ("loz", "\u{25CA}"),
    ("lozenge", "\u{25CA}"),
    ("cir", "\u{25CB}"),
    ("xcirc", "\u{25EF}"),
    ("bigcirc", "\u{25EF}"),
    // Miscellaneous symbols and dingbats.
    ("starf", "\u{2605}"),
    ("bigstar", "\u{2605}"),
    ("star", "\u{2606}"),
    ("phone", "\u{260E}"),
    ("female", "\u{2640}"),
    ("male", "\u{2642}"),
    ("spades", "\u{2660}"),
    ("spadesuit", "\u{2660}"),
    ("clubs", "\u{2663}"),
    ("clubsuit", "\u{2663}"),
    ("hearts", "\u{2665}"),
    ("heartsuit", "\u{2665}"),
    ("diams", "\u{2666}"),
    ("diamondsuit", "\u{2666}"),
    ("sung", "\u{266A}"),
    ("flat", "\u{266D}"),
    ("natur", "\u{266E}"),
    ("natural", "\u{266E}"),
    ("sharp", "\u{266F}"),
    ("check", "\u{2713}"),
    ("checkmark", "\u{2713}"),
    ("cross", "\u{2717}"),
    ("malt", "\u{2720}"),
    ("maltese", "\u{2720}"),
    ("sext", "\u{2736}"),
    ("lbbrk", "\u{2772}"),
    ("rbbrk", "\u{2773}"),
    ("nvlt", "<\u{20D2}"),
    ("nvgt", ">\u{20D2}"),
    // Mathematical alphanumerics outside the basic multilingual plane.
    ("Afr", "\u{1D504}"),
    ("Bfr", "\u{1D505}"),
    ("afr", "\u{1D51E}"),
    ("bfr", "\u{1D51F}"),
    ("zfr", "\u{1D537}"),
    ("Aopf", "\u{1D538}"),
    ("Bopf", "\u{1D539}"),
    ("aopf", "\u{1D552}"),
    ("bopf", "\u{1D553}"),
    ("zopf", "\u{1D56B}"),
    ("Ascr", "\u{1D49C}"),
    ("ascr", "\u{1D4B6}"),
    ("bscr", "\u{1D4B7}"),
    ("zscr", "\u{1D4CF}"),
    ("fflig", "\u{FB00}"),
    ("filig", "\u{FB01}"),
    ("fllig", "\u{FB02}"),
    ("ffilig", "\u{FB03}"),
    ("ffllig", "\u{FB04}"),
];

/// Names that also match without a terminating semicolon in legacy and
/// attribute contexts.
pub(crate) static LEGACY: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren", "deg",
    "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34", "gt",
    "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// The five references XML predefines. None of them match without `;`.
pub(crate) static XML: &[(&str, &str)] = &[
    ("amp", "&"),
    ("apos", "'"),
    ("gt", ">"),
    ("lt", "<"),
    ("quot", "\""),
];
