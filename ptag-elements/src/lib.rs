#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub use ptag::{Content, Error, Tag};

/// Generates one constructor per `fn_name => "tagName"` entry, plus the
/// sorted [`TAG_NAMES`] table. Entries must be listed in tag-name order.
macro_rules! elements {
    ( $( $func:ident => $tag:literal; )* ) => {
        $(
            #[doc = concat!("Create a `<", $tag, ">` element; see [`Tag::new`].")]
            pub fn $func(content: impl Into<Content>) -> Result<Tag, Error> {
                Tag::new($tag, content)
            }
        )*

        /// Every tag name with a constructor in this crate, sorted.
        pub const TAG_NAMES: &[&str] = &[ $( $tag, )* ];
    };
}

/// Look up a tag name in the vocabulary, returning its static spelling.
pub fn lookup(name: &str) -> Option<&'static str> {
    TAG_NAMES
        .binary_search_by(|probe| (*probe).cmp(name))
        .ok()
        .map(|index| TAG_NAMES[index])
}

/// Construct an element by tag name, or `None` if the name is not in the
/// vocabulary.
///
/// ```
/// let div = ptag_elements::element("div", "hello").unwrap()?;
/// assert_eq!(div.to_string(), "<div>hello</div>");
/// assert!(ptag_elements::element("blink", ()).is_none());
/// # Ok::<(), ptag::Error>(())
/// ```
pub fn element(name: &str, content: impl Into<Content>) -> Option<Result<Tag, Error>> {
    lookup(name).map(|tag| Tag::new(tag, content))
}

// HTML tags from https://www.w3schools.com/tags/ and SVG elements from
// https://developer.mozilla.org/en-US/docs/Web/SVG/Element. `del`, `input`,
// `map`, `object` and `use` take a trailing underscore.
elements! {
    a => "a";
    abbr => "abbr";
    acronym => "acronym";
    address => "address";
    animate => "animate";
    animate_motion => "animateMotion";
    animate_transform => "animateTransform";
    applet => "applet";
    area => "area";
    article => "article";
    aside => "aside";
    audio => "audio";
    b => "b";
    base => "base";
    basefont => "basefont";
    bdi => "bdi";
    bdo => "bdo";
    big => "big";
    blockquote => "blockquote";
    body => "body";
    br => "br";
    button => "button";
    canvas => "canvas";
    caption => "caption";
    center => "center";
    circle => "circle";
    cite => "cite";
    clip_path => "clipPath";
    code => "code";
    col => "col";
    colgroup => "colgroup";
    data => "data";
    datalist => "datalist";
    dd => "dd";
    defs => "defs";
    del_ => "del";
    desc => "desc";
    details => "details";
    dfn => "dfn";
    dialog => "dialog";
    dir => "dir";
    div => "div";
    dl => "dl";
    dt => "dt";
    ellipse => "ellipse";
    em => "em";
    embed => "embed";
    fe_blend => "feBlend";
    fe_color_matrix => "feColorMatrix";
    fe_component_transfer => "feComponentTransfer";
    fe_composite => "feComposite";
    fe_convolve_matrix => "feConvolveMatrix";
    fe_diffuse_lighting => "feDiffuseLighting";
    fe_displacement_map => "feDisplacementMap";
    fe_distant_light => "feDistantLight";
    fe_drop_shadow => "feDropShadow";
    fe_flood => "feFlood";
    fe_func_a => "feFuncA";
    fe_func_b => "feFuncB";
    fe_func_g => "feFuncG";
    fe_func_r => "feFuncR";
    fe_gaussian_blur => "feGaussianBlur";
    fe_image => "feImage";
    fe_merge => "feMerge";
    fe_merge_node => "feMergeNode";
    fe_morphology => "feMorphology";
    fe_offset => "feOffset";
    fe_point_light => "fePointLight";
    fe_specular_lighting => "feSpecularLighting";
    fe_spot_light => "feSpotLight";
    fe_tile => "feTile";
    fe_turbulence => "feTurbulence";
    fieldset => "fieldset";
    figcaption => "figcaption";
    figure => "figure";
    filter => "filter";
    font => "font";
    footer => "footer";
    foreign_object => "foreignObject";
    form => "form";
    frame => "frame";
    frameset => "frameset";
    g => "g";
    h1 => "h1";
    h2 => "h2";
    h3 => "h3";
    h4 => "h4";
    h5 => "h5";
    h6 => "h6";
    head => "head";
    header => "header";
    hgroup => "hgroup";
    hr => "hr";
    html => "html";
    i => "i";
    iframe => "iframe";
    image => "image";
    img => "img";
    input_ => "input";
    ins => "ins";
    kbd => "kbd";
    label => "label";
    legend => "legend";
    li => "li";
    line => "line";
    linear_gradient => "linearGradient";
    link => "link";
    main => "main";
    map_ => "map";
    mark => "mark";
    marker => "marker";
    mask => "mask";
    menu => "menu";
    meta => "meta";
    metadata => "metadata";
    meter => "meter";
    mpath => "mpath";
    nav => "nav";
    noframes => "noframes";
    noscript => "noscript";
    object_ => "object";
    ol => "ol";
    optgroup => "optgroup";
    option => "option";
    output => "output";
    p => "p";
    param => "param";
    path => "path";
    pattern => "pattern";
    picture => "picture";
    polygon => "polygon";
    polyline => "polyline";
    pre => "pre";
    progress => "progress";
    q => "q";
    radial_gradient => "radialGradient";
    rect => "rect";
    rp => "rp";
    rt => "rt";
    ruby => "ruby";
    s => "s";
    samp => "samp";
    script => "script";
    search => "search";
    section => "section";
    select => "select";
    set => "set";
    small => "small";
    source => "source";
    span => "span";
    stop => "stop";
    strike => "strike";
    strong => "strong";
    style => "style";
    sub => "sub";
    summary => "summary";
    sup => "sup";
    svg => "svg";
    switch => "switch";
    symbol => "symbol";
    table => "table";
    tbody => "tbody";
    td => "td";
    template => "template";
    text => "text";
    text_path => "textPath";
    textarea => "textarea";
    tfoot => "tfoot";
    th => "th";
    thead => "thead";
    time => "time";
    title => "title";
    tr => "tr";
    track => "track";
    tspan => "tspan";
    tt => "tt";
    u => "u";
    ul => "ul";
    use_ => "use";
    var => "var";
    video => "video";
    view => "view";
    wbr => "wbr";
}
