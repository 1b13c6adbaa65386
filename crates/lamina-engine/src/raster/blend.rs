use crate::paint::color::to_u8;

/// Source-over for premultiplied float source onto a premultiplied byte destination.
#[inline]
pub(crate) fn src_over(dst: &mut [u8; 4], src: [f32; 4]) {
    let inv = 1.0 - src[3];
    for i in 0..4 {
        let d = dst[i] as f32 / 255.0;
        dst[i] = to_u8(src[i] + d * inv);
    }
}

/// Source-over of one premultiplied byte pixel onto another.
#[inline]
pub(crate) fn src_over_u8(dst: &mut [u8; 4], src: [u8; 4]) {
    if src[3] == 0 {
        return;
    }
    let s = [
        src[0] as f32 / 255.0,
        src[1] as f32 / 255.0,
        src[2] as f32 / 255.0,
        src[3] as f32 / 255.0,
    ];
    src_over(dst, s);
}
